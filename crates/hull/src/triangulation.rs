//! Arena-backed triangulation storage.
//!
//! The source stores simplices as a `std::list` and prepends new ones each
//! step, then reverses on the way out (`triangulation.rbegin()`) to recover
//! creation order. Here the arena is append-only and `SimplexId` is a
//! stable index, so pushing new simplices at the end already leaves them in
//! creation order — no reversal needed on extraction (see `DESIGN.md`).
//! Facets reference simplices by `SimplexId` plus the opposite-vertex index,
//! never by position, which is what makes it safe for the arena to keep
//! growing underneath live facet records.

use std::collections::BTreeSet;

/// Stable handle into the triangulation arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimplexId(pub usize);

/// A facet's reference to one of its bounding simplices: the simplex plus
/// the single vertex of that simplex not on the facet.
#[derive(Clone, Copy, Debug)]
pub struct IncidentSimplex {
    pub simplex: SimplexId,
    pub opposite_vertex: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Arena {
    simplices: Vec<BTreeSet<usize>>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn get(&self, id: SimplexId) -> &BTreeSet<usize> {
        &self.simplices[id.0]
    }

    /// Append a new simplex, returning its stable handle.
    pub fn push(&mut self, simplex: BTreeSet<usize>) -> SimplexId {
        let id = SimplexId(self.simplices.len());
        self.simplices.push(simplex);
        id
    }

    pub fn clear(&mut self) {
        self.simplices.clear();
    }

    /// Add `p` to every stored simplex in place (pyramid step).
    pub fn pyramid_with(&mut self, p: usize) {
        for s in &mut self.simplices {
            s.insert(p);
        }
    }

    /// Ids of simplices created from `start` (inclusive) to the current end
    /// — the simplices created during the current step.
    pub fn ids_from(&self, start: usize) -> impl Iterator<Item = SimplexId> + '_ {
        (start..self.simplices.len()).map(SimplexId)
    }

    /// Output order: creation (oldest-first) order, matching placing
    /// triangulation semantics.
    pub fn in_creation_order(&self) -> impl Iterator<Item = &BTreeSet<usize>> {
        self.simplices.iter()
    }
}
