//! Lineality pre-reduction (component C2).
//!
//! Projects the source points into the complement of the (candidate)
//! lineality space so the rest of the engine only ever sees a
//! full-dimensional-modulo-AH problem. Re-invoked mid-run whenever
//! `process_new_lineality` discovers additional lineality.

use crate::field::{basis_rows, null_space, solve_inverse, Matrix};

/// Result of one pre-reduction pass: the projected points/linealities plus
/// everything C6 needs to embed results back into the original coordinates.
pub struct Reduction {
    /// Effective points, `d'` columns.
    pub points: Matrix,
    /// Effective dimension `d' = d - rank(L')`.
    pub dim: usize,
    /// Row indices of `source_linealities` kept in the basis `L'`.
    pub basis_indices: Vec<usize>,
    /// Back-transform: `d x d`, such that embedding a `d'`-row zero-padded
    /// with lineality dims and right-multiplying by `transpose(back)`
    /// recovers original coordinates.
    pub back: Matrix,
}

/// Ambient dimension before any reduction: no lineality, identity transform.
pub fn identity_reduction(points: &Matrix, dim: usize) -> Reduction {
    Reduction {
        points: points.clone(),
        dim,
        basis_indices: Vec::new(),
        back: Matrix::identity(dim),
    }
}

/// Full pre-reduction against a non-empty lineality matrix
/// `source_linealities`. `points` and `source_linealities` must share `dim`
/// columns.
///
/// Returns `None` if the lineality spans the whole ambient space (`d - r =
/// 0`): the "degenerate to full linear space" case, handled by the caller.
pub fn reduce(points: &Matrix, source_linealities: &Matrix, dim: usize, expect_redundant: bool) -> Option<Reduction> {
    let basis_indices = if expect_redundant {
        basis_rows(source_linealities)
    } else {
        (0..source_linealities.rows()).collect()
    };
    let l_prime = source_linealities.select_rows(&basis_indices);
    let r = l_prime.rows();

    let complement = null_space(&l_prime);
    if complement.rows() == 0 {
        return None;
    }
    debug_assert_eq!(complement.rows(), dim - r);

    let m = complement.vcat(&l_prime);
    let t = solve_inverse(&m);

    let projected = points.mul(&t);
    let d_prime = dim - r;
    let points_prime = projected.first_columns(d_prime);

    Some(Reduction {
        points: points_prime,
        dim: d_prime,
        basis_indices,
        back: t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{int, Vector};

    #[test]
    fn identity_when_no_lineality() {
        let pts = Matrix::from_rows(vec![Vector(vec![int(1), int(2)])], 2);
        let red = identity_reduction(&pts, 2);
        assert_eq!(red.dim, 2);
        assert_eq!(red.basis_indices.len(), 0);
    }

    #[test]
    fn reduces_dimension_by_lineality_rank() {
        // lineality = x-axis in 2d; points should collapse to 1 effective dim.
        let lin = Matrix::from_rows(vec![Vector(vec![int(1), int(0)])], 2);
        let pts = Matrix::from_rows(
            vec![
                Vector(vec![int(3), int(5)]),
                Vector(vec![int(7), int(5)]),
            ],
            2,
        );
        let red = reduce(&pts, &lin, 2, true).expect("not degenerate");
        assert_eq!(red.dim, 1);
        assert_eq!(red.points.rows(), 2);
        // Both points share the same y-coordinate, so after projecting out
        // the x-axis lineality they collapse to equal effective rows.
        assert_eq!(red.points.row(0), red.points.row(1));
    }

    #[test]
    fn full_ambient_lineality_is_degenerate() {
        let lin = Matrix::identity(2);
        let pts = Matrix::from_rows(vec![Vector(vec![int(1), int(1)])], 2);
        assert!(reduce(&pts, &lin, 2, true).is_none());
    }
}
