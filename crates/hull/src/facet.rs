//! Facet geometry (component C4).
//!
//! A facet's inward normal can be computed two ways depending on whether
//! the affine hull has already collapsed to nothing (full-dimensional case)
//! or a precomputed "facet nullspace" is still being narrowed down
//! (low-dimensional case). Both paths finish with the same sign-fix: pick
//! any retained vertex not on the facet and flip the normal if it scores
//! negative.

use crate::field::{dot, null_space, reduce_nullspace, sign, sqr, Matrix, Scalar, Vector};
use crate::triangulation::{Arena, IncidentSimplex, SimplexId};
use std::collections::BTreeSet;

/// Node-attached data for one dual-graph facet.
#[derive(Clone, Debug)]
pub struct FacetData {
    /// Inward normal; `None` while deferred in the low-dimensional state
    /// before the polytope's first simplex base is known.
    pub normal: Option<Vector>,
    pub sqr_normal: Option<Scalar>,
    /// Sign of `normal . p` for the point `p` currently being processed.
    /// Transient: meaningful only during one step of the driver.
    pub orientation: i8,
    pub vertices: BTreeSet<usize>,
    pub simplices: Vec<IncidentSimplex>,
}

impl FacetData {
    pub fn new(vertices: BTreeSet<usize>) -> Self {
        FacetData {
            normal: None,
            sqr_normal: None,
            orientation: 0,
            vertices,
            simplices: Vec::new(),
        }
    }

    /// Full-dimensional case: the normal is any non-zero row of
    /// `null_space(points[vertices])` (the facet's vertices span a
    /// hyperplane through a (d-1)-dimensional subspace once normals are
    /// meaningful at all).
    pub fn coord_full_dim(&mut self, points: &Matrix, reference_point: &Vector) {
        let idx: Vec<usize> = self.vertices.iter().copied().collect();
        let sub = points.select_rows(&idx);
        let ns = null_space(&sub);
        let mut normal = ns.row(0).clone();
        if sign(&dot(&normal, reference_point)) < 0 {
            normal = normal.negate();
        }
        self.sqr_normal = Some(sqr(&normal));
        self.normal = Some(normal);
    }

    /// Low-dimensional case: start from the shared `facet_nullspace` (the
    /// affine hull's orthogonal complement, far-hyperplane-aware for
    /// polytopes) and narrow it down by every vertex of this facet; the
    /// first remaining row is the normal.
    pub fn coord_low_dim(
        &mut self,
        facet_nullspace: &Matrix,
        points: &Matrix,
        reference_point: &Vector,
    ) {
        let mut ns = facet_nullspace.clone();
        for &v in &self.vertices {
            reduce_nullspace(&mut ns, points.row(v));
        }
        let mut normal = ns.row(0).clone();
        if sign(&dot(&normal, reference_point)) < 0 {
            normal = normal.negate();
        }
        self.sqr_normal = Some(sqr(&normal));
        self.normal = Some(normal);
    }

    /// Record which of the arena's simplices in `ids` are incident to this
    /// facet: a simplex `S` is incident iff `|S \ vertices| = 1`, and the
    /// single leftover element is the opposite vertex.
    pub fn add_incident_simplices(&mut self, arena: &Arena, ids: impl Iterator<Item = SimplexId>) {
        for id in ids {
            let s = arena.get(id);
            let mut diff = s.difference(&self.vertices);
            if let Some(&opp) = diff.next() {
                if diff.next().is_none() {
                    self.simplices.push(IncidentSimplex {
                        simplex: id,
                        opposite_vertex: opp,
                    });
                }
            }
        }
    }
}
