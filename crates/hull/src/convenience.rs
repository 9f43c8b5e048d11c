//! Convenience entry points, mirroring the handful of named operations the
//! original callable surface exposed on top of the bare `compute` loop.

use crate::config::Options;
use crate::error::EngineError;
use crate::field::Matrix;
use crate::result::EngineOutput;
use crate::{compute, compute_with_order};
use std::collections::BTreeSet;

/// Facets of the polyhedron generated by `points` (primal mode).
pub fn enumerate_facets(points: &Matrix, linealities: &Matrix, for_cone: bool) -> Result<Matrix, EngineError> {
    let options = Options::new().with_for_cone(for_cone);
    let out = compute(points, linealities, options)?;
    Ok(out.facets)
}

/// Vertices/rays of the polyhedron described by `inequalities` (dual mode):
/// running the same hull engine over the inequality coefficients as if they
/// were points, the resulting *facets* are exactly the polyhedron's vertices
/// (the standard polar-duality reuse of one solver for both directions).
pub fn enumerate_vertices(inequalities: &Matrix, equations: &Matrix, for_cone: bool) -> Result<Matrix, EngineError> {
    let options = Options::new().with_for_cone(for_cone).with_compute_vertices(true);
    let out = compute(inequalities, equations, options)?;
    Ok(out.facets)
}

/// The subset of `points` that survive as non-redundant (vertices/rays).
pub fn get_non_redundant_points(points: &Matrix, linealities: &Matrix, for_cone: bool) -> Result<Vec<usize>, EngineError> {
    let options = Options::new().with_for_cone(for_cone).with_expect_redundant(true);
    let out = compute(points, linealities, options)?;
    Ok(out.non_redundant_points)
}

/// The subset of `inequalities` that are irredundant facet-defining
/// constraints.
pub fn get_non_redundant_inequalities(
    inequalities: &Matrix,
    equations: &Matrix,
    for_cone: bool,
) -> Result<Vec<usize>, EngineError> {
    let options = Options::new()
        .with_for_cone(for_cone)
        .with_compute_vertices(true)
        .with_expect_redundant(true);
    let out = compute(inequalities, equations, options)?;
    Ok(out.non_redundant_points)
}

/// The placing triangulation of `points`, run with a caller-supplied
/// insertion order (the triangulation produced depends on it; see P1/L1).
pub fn placing_triangulation(
    points: &Matrix,
    linealities: &Matrix,
    for_cone: bool,
    order: &[usize],
) -> Result<Vec<BTreeSet<usize>>, EngineError> {
    let options = Options::new().with_for_cone(for_cone).with_make_triangulation(true);
    let out = compute_with_order(points, linealities, options, order)?;
    Ok(out.triangulation)
}

pub type Output = EngineOutput;
