//! Beneath-and-beyond incremental convex-hull engine.
//!
//! Grows a polyhedron one point at a time over an exact rational field,
//! maintaining facet normals, the dual graph of the facet lattice, and
//! (optionally) a placing triangulation, all in one pass (see
//! [`compute`]). The dual problem — vertices from inequalities — is the
//! same loop run with `compute_vertices` set on [`Options`].

pub mod config;
pub mod convenience;
pub mod driver;
pub mod error;
pub mod facet;
pub mod field;
pub mod graph;
pub mod lineality;
pub mod result;
pub mod triangulation;

pub use config::Options;
pub use error::EngineError;
pub use field::{Matrix, Scalar, Vector};
pub use result::EngineOutput;

use driver::Driver;
use tracing::info_span;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the engine on `points` (or, in dual mode, on `inequalities`) with
/// `linealities` (or `equations`) and the identity permutation `0..n` as
/// insertion order.
pub fn compute(points: &Matrix, linealities: &Matrix, options: Options) -> Result<EngineOutput, EngineError> {
    let order: Vec<usize> = (0..points.rows()).collect();
    compute_with_order(points, linealities, options, &order)
}

/// As [`compute`], but with an explicit point insertion order (a permutation
/// of `0..points.rows()`). Different orders may yield different
/// triangulations but the same set of facets (see property L1).
///
/// Affine points (`for_cone = false`) are internally homogenized with a
/// leading `1` column (linealities with a leading `0`) so that the
/// hyperplane at infinity is simply column 0 — the standard trick for
/// running one state machine over both affine and conic input.
/// Facets and the affine hull keep that leading coordinate on the way out
/// (it is the inequality's constant term); `vertices` has it stripped back
/// off to match the caller's own coordinates.
pub fn compute_with_order(
    points: &Matrix,
    linealities: &Matrix,
    options: Options,
    order: &[usize],
) -> Result<EngineOutput, EngineError> {
    let span = info_span!("compute", n = points.rows(), d = points.cols(), dual = options.compute_vertices);
    let _enter = span.enter();

    let (hpoints, hlinealities, dim) = if options.for_cone {
        (points.clone(), linealities.clone(), points.cols())
    } else {
        (
            points.prepend_constant_column(field::int(1)),
            linealities.prepend_constant_column(field::int(0)),
            points.cols() + 1,
        )
    };

    let mut driver = Driver::new(hpoints, hlinealities, dim, options)?;
    driver.compute(order)?;

    let mut out = result::extract(&driver, points.rows());
    if !options.for_cone {
        out.vertices = out.vertices.drop_first_column();
    }

    if options.compute_vertices && out.facets.rows() == 0 && out.affine_hull.rows() == 0 && points.rows() > 0 {
        return Err(EngineError::Infeasible);
    }

    Ok(out)
}
