//! Universal invariants and law-like properties: facet correctness and
//! incidence, partition of points, permutation invariance, affine hull
//! correctness, dual round-trips, triangulation coverage, and sign
//! consistency of incidence.

use hull::field::{dot, int, is_zero, sign, Matrix, Vector};
use hull::{compute_with_order, Options};
use itertools::Itertools;
use proptest::prelude::*;

fn row(xs: &[i64]) -> Vector {
    Vector(xs.iter().map(|&x| int(x)).collect())
}

fn mat(rows: &[[i64; 2]]) -> Matrix {
    Matrix::from_rows(rows.iter().map(|r| row(r)).collect(), 2)
}

fn mat3(rows: &[[i64; 3]]) -> Matrix {
    Matrix::from_rows(rows.iter().map(|r| row(r)).collect(), 3)
}

/// P1 + P7: every facet's normal is non-negative on every retained vertex,
/// zero exactly on the vertices it lists, and the incidence matrix agrees.
#[test]
fn p1_and_p7_facet_correctness_and_incidence() {
    let points = mat(&[[0, 0], [2, 0], [0, 2], [2, 2]]);
    let lin = Matrix::zero(0, 2);
    let out = compute_with_order(&points, &lin, Options::new(), &[0, 1, 2, 3]).unwrap();

    let homogenized_vertices: Vec<Vector> = out
        .non_redundant_points
        .iter()
        .map(|&i| {
            let mut v = vec![int(1)];
            v.extend(points.row(i).0.iter().cloned());
            Vector(v)
        })
        .collect();

    for (fi, &facet_id) in out.dual_graph.node_ids().iter().enumerate() {
        let facet = out.dual_graph.facet(facet_id);
        for (pi, v) in homogenized_vertices.iter().enumerate() {
            let s = dot(facet.normal.as_ref().unwrap(), v);
            let point_index = out.non_redundant_points[pi];
            let on_facet = facet.vertices.contains(&point_index);
            if on_facet {
                assert!(is_zero(&s), "vertex on facet must have zero orientation");
            } else {
                assert!(!is_zero(&s), "vertex off facet should not score exactly zero in this square");
            }
            assert_eq!(out.vertex_facet_incidence[fi][pi], on_facet);
        }
    }
}

/// P3: every point is either non-redundant or interior, never both/neither.
#[test]
fn p3_partition_of_points() {
    let points = mat(&[[0, 0], [2, 0], [0, 2], [2, 2], [1, 1]]);
    let lin = Matrix::zero(0, 2);
    let out = compute_with_order(&points, &lin, Options::new().with_expect_redundant(true), &[0, 1, 2, 3, 4]).unwrap();

    let mut seen = std::collections::BTreeSet::new();
    for p in &out.non_redundant_points {
        assert!(seen.insert(*p), "point listed twice as non-redundant");
    }
    assert_eq!(out.non_redundant_points, vec![0, 1, 2, 3]);
    // point 4 (the center) is exactly the complement: interior.
    assert!(!out.non_redundant_points.contains(&4));
}

/// L1: the set of facet hyperplanes doesn't depend on insertion order.
#[test]
fn l1_permutation_invariance_of_facets() {
    let points = mat(&[[0, 0], [2, 0], [0, 2], [2, 2]]);
    let lin = Matrix::zero(0, 2);

    let mut facet_sets = Vec::new();
    for perm in (0..points.rows()).permutations(points.rows()) {
        let out = compute_with_order(&points, &lin, Options::new(), &perm).unwrap();
        let mut normals: Vec<Vec<String>> = out
            .dual_graph
            .node_ids()
            .iter()
            .map(|&id| out.dual_graph.facet(id).normal.as_ref().unwrap().0.iter().map(|x| x.to_string()).collect())
            .collect();
        normals.sort();
        facet_sets.push(normals);
    }
    for pair in facet_sets.windows(2) {
        assert_eq!(pair[0], pair[1], "facet set must not depend on insertion order");
    }
}

/// L2: facets of P, fed back as homogeneous cone points, recover P's
/// vertices up to permutation and scaling (polar duality, the same trick
/// `convenience::enumerate_vertices` relies on for dual-mode output).
#[test]
fn l2_dual_round_trip_recovers_vertices() {
    let points = mat(&[[0, 0], [1, 0], [0, 1], [1, 1]]);
    let lin = Matrix::zero(0, 2);
    let primal = compute_with_order(&points, &lin, Options::new(), &[0, 1, 2, 3]).unwrap();
    assert_eq!(primal.facets.rows(), 4);

    let dual = compute_with_order(&primal.facets, &Matrix::zero(0, primal.facets.cols()), Options::new().with_for_cone(true), &[0, 1, 2, 3]).unwrap();
    assert_eq!(dual.facets.rows(), 4);

    let expected: Vec<Vector> = [[0, 0], [1, 0], [0, 1], [1, 1]]
        .iter()
        .map(|&[x, y]| Vector(vec![int(1), int(x), int(y)]))
        .collect();

    let mut matched = vec![false; expected.len()];
    for recovered in dual.facets.row_iter() {
        let scale = recovered.0[0].clone();
        assert!(!is_zero(&scale), "recovered ray must not be orthogonal to the homogenizing coordinate");
        let hit = expected.iter().position(|e| {
            recovered.0.iter().zip(e.0.iter()).all(|(r, ei)| *r == scale.clone() * ei.clone())
        });
        match hit {
            Some(i) if !matched[i] => matched[i] = true,
            _ => panic!("recovered ray {recovered:?} does not match a distinct original vertex"),
        }
    }
    assert!(matched.iter().all(|&m| m), "every original vertex must be recovered exactly once (up to scale)");
}

/// P4: every triangulation simplex has `dim+1` vertices and their union is
/// exactly the non-redundant point set.
#[test]
fn p4_triangulation_cover() {
    let points = mat3(&[[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]]);
    let lin = Matrix::zero(0, 3);
    let out = compute_with_order(&points, &lin, Options::new().with_make_triangulation(true), &[0, 1, 2, 3]).unwrap();
    let dim = 3;

    let mut covered = std::collections::BTreeSet::new();
    for simplex in &out.triangulation {
        assert_eq!(simplex.len(), dim + 1, "every simplex must have dim+1 vertices");
        covered.extend(simplex.iter().copied());
    }
    let expected: std::collections::BTreeSet<usize> = out.non_redundant_points.iter().copied().collect();
    assert_eq!(covered, expected);
}

/// P5: any two distinct simplices share at most `dim` vertices (sharing
/// `dim+1` would make them the same simplex).
#[test]
fn p5_triangulation_pairwise_intersection() {
    // A tetrahedron plus a 5th vertex beyond its `x+y+z<=1` face: a genuine
    // non-simplicial polytope, so the placing triangulation has more than
    // one simplex to compare.
    let points = mat3(&[[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1], [1, 1, 1]]);
    let lin = Matrix::zero(0, 3);
    let out = compute_with_order(&points, &lin, Options::new().with_make_triangulation(true), &[0, 1, 2, 3, 4]).unwrap();
    assert!(out.triangulation.len() > 1, "expected more than one simplex to compare");
    let dim = 3;

    for i in 0..out.triangulation.len() {
        for j in (i + 1)..out.triangulation.len() {
            assert_ne!(out.triangulation[i], out.triangulation[j], "no duplicate simplices");
            let shared = out.triangulation[i].intersection(&out.triangulation[j]).count();
            assert!(shared <= dim, "distinct simplices must not share all dim+1 vertices");
        }
    }
}

/// P6: facets joined by a dual-graph edge share at least `dim(polyhedron)-1`
/// vertices.
#[test]
fn p6_dual_graph_consistency() {
    let points = mat3(&[[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]]);
    let lin = Matrix::zero(0, 3);
    let out = compute_with_order(&points, &lin, Options::new(), &[0, 1, 2, 3]).unwrap();
    let dim = 3;

    for f in out.dual_graph.node_ids() {
        for g in out.dual_graph.adjacent_nodes(f) {
            let shared = out.dual_graph.facet(f).vertices.intersection(&out.dual_graph.facet(g).vertices).count();
            assert!(shared >= dim - 1, "adjacent facets must share at least dim-1 vertices");
        }
    }
}

fn sorted_facet_normals(out: &hull::EngineOutput) -> Vec<Vec<String>> {
    let mut normals: Vec<Vec<String>> = out
        .dual_graph
        .node_ids()
        .iter()
        .map(|&id| out.dual_graph.facet(id).normal.as_ref().unwrap().0.iter().map(|x| x.to_string()).collect())
        .collect();
    normals.sort();
    normals
}

/// L3: appending a convex combination of existing points (i.e. an interior
/// point) under `expect_redundant=true` leaves facets, affine hull, and the
/// non-redundant vertex set unchanged.
#[test]
fn l3_idempotence_under_interior_point() {
    let points = mat(&[[0, 0], [2, 0], [0, 2], [2, 2]]);
    let lin = Matrix::zero(0, 2);
    let base = compute_with_order(&points, &lin, Options::new().with_expect_redundant(true), &[0, 1, 2, 3]).unwrap();

    let with_center = mat(&[[0, 0], [2, 0], [0, 2], [2, 2], [1, 1]]);
    let extended = compute_with_order(&with_center, &lin, Options::new().with_expect_redundant(true), &[0, 1, 2, 3, 4]).unwrap();

    assert_eq!(sorted_facet_normals(&base), sorted_facet_normals(&extended));
    assert_eq!(base.non_redundant_points, extended.non_redundant_points);
    assert_eq!(base.affine_hull.rows(), extended.affine_hull.rows());
}

/// L4: the orientation sign convention is internal bookkeeping only — facets
/// always come out outward-pointing (positive on no retained vertex, zero on
/// their own), regardless of which point happened to seed each facet.
#[test]
fn l4_sign_consistency_of_incidence() {
    let points = mat(&[[0, 0], [2, 0], [0, 2], [2, 2]]);
    let lin = Matrix::zero(0, 2);
    for order in (0..points.rows()).permutations(points.rows()).take(6) {
        let out = compute_with_order(&points, &lin, Options::new(), &order).unwrap();
        for &f in &out.dual_graph.node_ids() {
            let facet = out.dual_graph.facet(f);
            let normal = facet.normal.as_ref().unwrap();
            for &p in &out.non_redundant_points {
                let mut hp = vec![int(1)];
                hp.extend(points.row(p).0.iter().cloned());
                let s = dot(normal, &Vector(hp));
                let on_facet = facet.vertices.contains(&p);
                assert!(sign(&s) >= 0, "facet normal must never be negative on a retained vertex");
                assert_eq!(on_facet, is_zero(&s));
            }
        }
    }
}

proptest! {
    /// P2: every retained point satisfies every affine-hull row with equality.
    #[test]
    fn p2_affine_hull_correctness(a in -5i64..5, b in -5i64..5, c in -5i64..5, d in -5i64..5) {
        let points = mat(&[[0, 0], [a, b], [c, d]]);
        let lin = Matrix::zero(0, 2);
        if let Ok(out) = compute_with_order(&points, &lin, Options::new().with_expect_redundant(true), &[0, 1, 2]) {
            for &p in &out.non_redundant_points {
                let mut hp = vec![int(1)];
                hp.extend(points.row(p).0.iter().cloned());
                let hp = Vector(hp);
                for r in out.affine_hull.row_iter() {
                    prop_assert!(is_zero(&dot(r, &hp)));
                }
            }
        }
    }
}
