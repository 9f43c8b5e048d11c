//! Errors surfaced at the [`crate::compute`] boundary.

use thiserror::Error;

/// Failure modes visible to callers of [`crate::compute`].
///
/// `DegenerateToFullLinearSpace` from the design is deliberately not a
/// variant here: it is an internal restart signal, caught inside `compute`
/// and folded into a legitimate empty-polyhedron result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `expect_redundant` was false and point `index` turned out to be a
    /// duplicate, collinear/coplanar, or strictly interior point.
    #[error("point {index} is redundant but expect_redundant is false")]
    UnexpectedRedundantPoint { index: usize },

    /// Dual mode only (`compute_vertices = true`): the input inequalities
    /// and equations described an infeasible system (no facets, no affine
    /// hull, yet non-empty input).
    #[error("the inequality system is infeasible")]
    Infeasible,
}
