//! Dual-graph store (component C3).
//!
//! One node per facet, one edge per pair of adjacent facets, carrying the
//! ridge (shared vertex set) as edge weight. Built on
//! [`petgraph::stable_graph::StableUnGraph`]: node and edge indices stay
//! valid across deletions and freed node slots are reused on the next
//! `add_node`, a generational-index-based graph in place of the original's
//! bespoke AVL-backed sparse graph.

use crate::facet::FacetData;
use crate::field::Scalar;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use std::collections::BTreeSet;

/// Handle to a facet / dual-graph node. Stable across deletions of *other*
/// nodes; reused (by petgraph) once the facet it named is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FacetId(pub(crate) NodeIndex);

/// Ridge attached to a dual-graph edge: the vertex indices it contains.
pub type Ridge = BTreeSet<usize>;

#[derive(Clone, Debug, Default)]
pub struct DualGraph {
    inner: StableUnGraph<FacetData, Ridge>,
}

impl DualGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, facet: FacetData) -> FacetId {
        FacetId(self.inner.add_node(facet))
    }

    pub fn delete_node(&mut self, f: FacetId) {
        self.inner.remove_node(f.0);
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn facet(&self, f: FacetId) -> &FacetData {
        &self.inner[f.0]
    }

    pub fn facet_mut(&mut self, f: FacetId) -> &mut FacetData {
        &mut self.inner[f.0]
    }

    /// Nodes in increasing index order — used to assign stable output rows.
    /// Petgraph keeps indices compact via its free list, so extraction only
    /// needs a fixed enumeration order, not an explicit relabeling pass (see
    /// `DESIGN.md`).
    pub fn node_ids(&self) -> Vec<FacetId> {
        self.inner.node_indices().map(FacetId).collect()
    }

    pub fn edge_exists(&self, a: FacetId, b: FacetId) -> bool {
        self.inner.find_edge(a.0, b.0).is_some()
    }

    pub fn add_edge(&mut self, a: FacetId, b: FacetId, ridge: Ridge) -> EdgeIndex {
        self.inner.add_edge(a.0, b.0, ridge)
    }

    pub fn ridge(&self, e: EdgeIndex) -> &Ridge {
        &self.inner[e]
    }

    pub fn ridge_mut(&mut self, e: EdgeIndex) -> &mut Ridge {
        &mut self.inner[e]
    }

    pub fn remove_edge(&mut self, e: EdgeIndex) {
        self.inner.remove_edge(e);
    }

    /// Neighboring facets of `f`.
    pub fn adjacent_nodes(&self, f: FacetId) -> impl Iterator<Item = FacetId> + '_ {
        self.inner.neighbors(f.0).map(FacetId)
    }

    /// Out-edges of `f` as `(edge index, neighbor)` pairs.
    pub fn out_edges(&self, f: FacetId) -> impl Iterator<Item = (EdgeIndex, FacetId)> + '_ {
        self.inner
            .edges(f.0)
            .map(|e| (e.id(), FacetId(if e.source() == f.0 { e.target() } else { e.source() })))
    }

    /// Every row vector of `normal`, for the rows of interest, in node-id
    /// order — the shape `getFacets()` needs before the lineality
    /// back-transform (component C6).
    pub fn normals_in_order(&self) -> Vec<(FacetId, &crate::field::Vector, &Scalar)> {
        self.node_ids()
            .into_iter()
            .map(|id| {
                let f = self.facet(id);
                (
                    id,
                    f.normal.as_ref().expect("facet normal not computed"),
                    f.sqr_normal.as_ref().expect("facet sqr_normal not computed"),
                )
            })
            .collect()
    }
}
