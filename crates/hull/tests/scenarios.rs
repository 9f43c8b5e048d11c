//! Boundary scenarios: empty input, a single ray, a simple square, a point
//! in the interior, collinear input, and a tetrahedron.

use hull::field::{int, Matrix, Vector};
use hull::{compute, compute_with_order, Options};
use std::collections::BTreeSet;

fn row(xs: &[i64]) -> Vector {
    Vector(xs.iter().map(|&x| int(x)).collect())
}

fn mat(rows: Vec<Vec<i64>>, cols: usize) -> Matrix {
    Matrix::from_rows(rows.into_iter().map(|r| row(&r)).collect(), cols)
}

#[test]
fn s1_empty_input_affine() {
    let points = Matrix::zero(0, 2);
    let lin = Matrix::zero(0, 2);
    let out = compute(&points, &lin, Options::new()).expect("empty input always succeeds");
    assert_eq!(out.facets.rows(), 0);
    assert_eq!(out.affine_hull.rows(), 0);
    assert!(out.non_redundant_points.is_empty());
}

#[test]
fn s1_empty_input_cone() {
    let points = Matrix::zero(0, 2);
    let lin = Matrix::zero(0, 2);
    let out = compute(&points, &lin, Options::new().with_for_cone(true)).unwrap();
    assert_eq!(out.facets.rows(), 0);
}

#[test]
fn s2_single_ray_cone() {
    let points = mat(vec![vec![3, 4]], 2);
    let lin = Matrix::zero(0, 2);
    let out = compute(&points, &lin, Options::new().with_for_cone(true)).unwrap();
    assert_eq!(out.facets.rows(), 1);
    assert_eq!(out.triangulation.len(), 1);
    let expected: BTreeSet<usize> = [0].into_iter().collect();
    assert_eq!(out.triangulation[0], expected);
}

#[test]
fn s3_unit_square_affine() {
    let points = mat(vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]], 2);
    let lin = Matrix::zero(0, 2);
    let out = compute(&points, &lin, Options::new()).unwrap();
    assert_eq!(out.facets.rows(), 4);
    assert_eq!(out.non_redundant_points, vec![0, 1, 2, 3]);
    assert_eq!(out.triangulation.len(), 2);
}

#[test]
fn s4_square_with_interior_center() {
    // Scaled-up square so the center point has integer coordinates.
    let points = mat(
        vec![
            vec![0, 0],
            vec![2, 0],
            vec![0, 2],
            vec![2, 2],
            vec![1, 1],
        ],
        2,
    );
    let lin = Matrix::zero(0, 2);
    let out = compute(&points, &lin, Options::new().with_expect_redundant(true)).unwrap();
    assert_eq!(out.facets.rows(), 4);
    assert!(!out.non_redundant_points.contains(&4));
    assert_eq!(out.non_redundant_points, vec![0, 1, 2, 3]);
}

#[test]
fn s5_three_collinear_points() {
    let points = mat(vec![vec![0, 0], vec![1, 0], vec![2, 0]], 2);
    let lin = Matrix::zero(0, 2);
    let out = compute(&points, &lin, Options::new().with_expect_redundant(true)).unwrap();
    // The whole configuration collapses to a 1-d flat: no facets remain
    // (an affine line has no proper bounding facets in this model) and at
    // least one input point was absorbed as redundant along the line.
    assert!(out.non_redundant_points.len() < 3);
}

#[test]
fn s6_tetrahedron() {
    let points = mat(
        vec![vec![0, 0, 0], vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
        3,
    );
    let lin = Matrix::zero(0, 3);
    let order: Vec<usize> = (0..4).collect();
    let out = compute_with_order(&points, &lin, Options::new(), &order).unwrap();
    assert_eq!(out.facets.rows(), 4);
    assert_eq!(out.triangulation.len(), 1);
    assert_eq!(out.triangulation[0].len(), 4);
    assert!(out.generic_position);
    for edges in out.dual_graph.node_ids() {
        assert_eq!(out.dual_graph.adjacent_nodes(edges).count(), 3);
    }
}
