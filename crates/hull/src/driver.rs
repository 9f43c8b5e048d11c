//! Step driver (component C5) — the heart of the engine.
//!
//! Drives `process_point` over a permutation of point indices, dispatching
//! on the current [`State`]. `update_facets` is the BFS-over-visibility
//! phase shared by the low-dimensional and full-dimensional cases.

use crate::config::Options;
use crate::error::EngineError;
use crate::facet::FacetData;
use crate::field::{basis_rows, dot, reduce_nullspace, sign, Matrix, Scalar, Vector};
use crate::graph::{DualGraph, FacetId, Ridge};
use crate::lineality::{self, Reduction};
use crate::triangulation::Arena;
use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, debug_span, error, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Zero,
    One,
    LowDim,
    FullDim,
}

/// Internal control-flow signal threaded through `process_point`, replacing
/// the original's stack-unwinding escape with an explicit return value.
pub(crate) enum StepOutcome {
    Continue,
    /// The accumulated lineality now fills the ambient space: the whole
    /// computation collapses to the trivial empty/apex result.
    Degenerate,
    /// New lineality was found; re-process these candidate points first
    /// (after the driver has reset to state `Zero` against the widened
    /// lineality basis).
    Restart(Vec<usize>),
}

pub struct Driver {
    source_points: Matrix,
    source_linealities: Matrix,
    ambient_dim: usize,
    options: Options,

    effective: Reduction,
    state: State,
    ah: Matrix,
    graph: DualGraph,
    arena: Arena,
    vertices_so_far: BTreeSet<usize>,
    interior_points: BTreeSet<usize>,
    v0: Option<usize>,
    valid_facet: Option<FacetId>,
    generic_position: bool,
    promoted_points: Vec<usize>,
}

impl Driver {
    pub fn new(
        source_points: Matrix,
        source_linealities: Matrix,
        ambient_dim: usize,
        options: Options,
    ) -> Result<Self, EngineError> {
        let effective = if source_linealities.rows() == 0 {
            lineality::identity_reduction(&source_points, ambient_dim)
        } else {
            match lineality::reduce(&source_points, &source_linealities, ambient_dim, options.expect_redundant) {
                Some(r) => r,
                None => lineality::identity_reduction(&Matrix::zero(source_points.rows(), 0), 0),
            }
        };
        let dim = effective.dim;
        Ok(Driver {
            source_points,
            source_linealities,
            ambient_dim,
            options,
            ah: Matrix::identity(dim),
            effective,
            state: State::Zero,
            graph: DualGraph::new(),
            arena: Arena::new(),
            vertices_so_far: BTreeSet::new(),
            interior_points: BTreeSet::new(),
            v0: None,
            valid_facet: None,
            generic_position: true,
            promoted_points: Vec::new(),
        })
    }

    pub fn dim(&self) -> usize {
        self.effective.dim
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn graph(&self) -> &DualGraph {
        &self.graph
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn affine_hull(&self) -> &Matrix {
        &self.ah
    }

    pub fn vertices_so_far(&self) -> &BTreeSet<usize> {
        &self.vertices_so_far
    }

    pub fn interior_points(&self) -> &BTreeSet<usize> {
        &self.interior_points
    }

    pub fn generic_position(&self) -> bool {
        self.generic_position
    }

    pub fn back_transform(&self) -> &Matrix {
        &self.effective.back
    }

    pub fn effective_points(&self) -> &Matrix {
        &self.effective.points
    }

    pub fn lineality_basis_indices(&self) -> &[usize] {
        &self.effective.basis_indices
    }

    pub fn promoted_points(&self) -> &[usize] {
        &self.promoted_points
    }

    /// Run the full point permutation to completion.
    pub fn compute(&mut self, order: &[usize]) -> Result<(), EngineError> {
        let mut pending: VecDeque<usize> = VecDeque::new();
        let mut idx = 0;
        loop {
            let p = if let Some(p) = pending.pop_front() {
                p
            } else if idx < order.len() {
                let p = order[idx];
                idx += 1;
                p
            } else {
                break;
            };
            if self.interior_points.contains(&p) || self.vertices_so_far.contains(&p) {
                continue;
            }
            let span = debug_span!("process_point", p);
            let _enter = span.enter();
            match self.process_point(p)? {
                StepOutcome::Continue => {}
                StepOutcome::Degenerate => {
                    self.collapse_to_degenerate();
                    return Ok(());
                }
                StepOutcome::Restart(candidates) => {
                    for c in candidates {
                        pending.push_back(c);
                    }
                }
            }
        }
        self.finalize();
        Ok(())
    }

    fn collapse_to_degenerate(&mut self) {
        debug!("lineality fills ambient space, collapsing to trivial result");
        self.ah = Matrix::zero(0, 0);
        self.graph.clear();
        self.arena.clear();
        self.vertices_so_far.clear();
        for i in 0..self.source_points.rows() {
            self.interior_points.insert(i);
        }
        self.state = State::Zero;
        self.generic_position = true;
    }

    fn finalize(&mut self) {
        if self.state == State::LowDim {
            self.compute_all_normals_low_dim();
        }
    }

    fn process_point(&mut self, p: usize) -> Result<StepOutcome, EngineError> {
        match self.state {
            State::Zero => self.step_zero(p),
            State::One => self.step_one(p),
            State::LowDim => self.step_low_dim(p),
            State::FullDim => self.step_full_dim(p),
        }
    }

    fn step_zero(&mut self, p: usize) -> Result<StepOutcome, EngineError> {
        let v = self.effective.points.row(p).clone();
        if v.is_zero_vector() {
            return self.mark_interior_or_fail(p);
        }
        reduce_nullspace(&mut self.ah, &v);
        self.vertices_so_far.insert(p);
        self.v0 = Some(p);
        self.state = State::One;
        Ok(StepOutcome::Continue)
    }

    fn step_one(&mut self, p: usize) -> Result<StepOutcome, EngineError> {
        let v0 = self.v0.expect("state One implies v0 is set");
        let pv = self.effective.points.row(p).clone();
        if pv.is_zero_vector() {
            return self.mark_interior_or_fail(p);
        }
        let v0v = self.effective.points.row(v0).clone();
        let stacked = Matrix::from_rows(vec![v0v.clone(), pv.clone()], self.effective.dim);
        let rank = basis_rows(&stacked).len();

        if rank == 1 {
            let i = v0v.first_nonzero_index().expect("v0 is non-zero");
            let same_sign = sign(&v0v[i]) == sign(&pv[i]);
            if same_sign {
                self.mark_interior_or_fail(p)
            } else if !self.options.expect_redundant {
                Err(EngineError::UnexpectedRedundantPoint { index: p })
            } else {
                self.interior_points.insert(p);
                Ok(self.process_new_lineality_from_direction(v0v))
            }
        } else {
            reduce_nullspace(&mut self.ah, &pv);
            self.create_first_two_facets(v0, p);
            self.vertices_so_far.insert(p);
            if self.ah.rows() == 0 {
                self.state = State::FullDim;
                self.compute_all_normals_full_dim();
            } else {
                self.state = State::LowDim;
            }
            Ok(StepOutcome::Continue)
        }
    }

    fn create_first_two_facets(&mut self, v0: usize, p: usize) {
        let mut f0_vertices = BTreeSet::new();
        f0_vertices.insert(v0);
        let mut f1_vertices = BTreeSet::new();
        f1_vertices.insert(p);
        let f0 = FacetData::new(f0_vertices);
        let f1 = FacetData::new(f1_vertices);
        let id0 = self.graph.add_node(f0);
        let id1 = self.graph.add_node(f1);
        let ridge: Ridge = BTreeSet::new();
        self.graph.add_edge(id0, id1, ridge);
        self.valid_facet = Some(id0);

        if self.options.make_triangulation {
            let mut simplex = BTreeSet::new();
            simplex.insert(v0);
            simplex.insert(p);
            self.arena.push(simplex);
        }
    }

    fn compute_all_normals_full_dim(&mut self) {
        let ids = self.graph.node_ids();
        for id in ids {
            let reference = self.any_vertex_outside(id);
            let points = self.effective.points.clone();
            let facet = self.graph.facet_mut(id);
            facet.coord_full_dim(&points, &reference);
        }
    }

    fn compute_all_normals_low_dim(&mut self) {
        let nullspace = self.facet_nullspace();
        let ids = self.graph.node_ids();
        for id in ids {
            let reference = self.any_vertex_outside(id);
            let points = self.effective.points.clone();
            let facet = self.graph.facet_mut(id);
            if facet.normal.is_none() {
                facet.coord_low_dim(&nullspace, &points, &reference);
            }
        }
    }

    fn any_vertex_outside(&self, f: FacetId) -> Vector {
        let facet = self.graph.facet(f);
        let q = *self
            .vertices_so_far
            .iter()
            .find(|v| !facet.vertices.contains(v))
            .expect("at least two facets exist, so some vertex lies outside any one of them");
        self.effective.points.row(q).clone()
    }

    /// `N = null_space(AH rows, with the far hyperplane [1,0,...,0]
    /// preserved for affine mode)`.
    fn facet_nullspace(&self) -> Matrix {
        if self.options.for_cone {
            crate::field::null_space(&self.ah)
        } else {
            let far = Vector::unit(self.effective.dim, 0);
            let augmented = self.ah.vcat(&Matrix::from_rows(vec![far], self.effective.dim));
            crate::field::null_space(&augmented)
        }
    }

    fn mark_interior_or_fail(&mut self, p: usize) -> Result<StepOutcome, EngineError> {
        if self.options.expect_redundant {
            self.interior_points.insert(p);
            Ok(StepOutcome::Continue)
        } else {
            Err(EngineError::UnexpectedRedundantPoint { index: p })
        }
    }

    fn step_full_dim(&mut self, p: usize) -> Result<StepOutcome, EngineError> {
        self.add_point_general(p)
    }

    fn step_low_dim(&mut self, p: usize) -> Result<StepOutcome, EngineError> {
        let pv = self.effective.points.row(p).clone();
        let in_ah = (0..self.ah.rows()).all(|i| dot(self.ah.row(i), &pv).is_zero());
        if in_ah {
            self.add_point_general(p)
        } else {
            self.pyramid_step(p);
            Ok(StepOutcome::Continue)
        }
    }

    /// Pyramid step: AH shrinks by one, a new apex facet collects the
    /// retained-minus-interior vertices, and every existing facet/simplex
    /// is extended by `p`.
    fn pyramid_step(&mut self, p: usize) {
        let pv = self.effective.points.row(p).clone();
        reduce_nullspace(&mut self.ah, &pv);

        let apex_vertices: BTreeSet<usize> = self
            .vertices_so_far
            .iter()
            .copied()
            .filter(|v| !self.interior_points.contains(v))
            .collect();
        let apex = FacetData::new(apex_vertices);
        let apex_id = self.graph.add_node(apex);

        let old_ids = self.graph.node_ids();
        for id in &old_ids {
            if *id == apex_id {
                continue;
            }
            let old_vertices = self.graph.facet(*id).vertices.clone();
            self.graph.facet_mut(*id).vertices.insert(p);
            self.graph.add_edge(*id, apex_id, old_vertices);
        }

        if self.options.make_triangulation {
            // Every existing simplex gains p in place; the apex records the
            // same simplices with p as its opposite vertex.
            self.arena.pyramid_with(p);
            for id in &old_ids {
                if *id == apex_id {
                    continue;
                }
                let simplices = self.graph.facet(*id).simplices.clone();
                for inc in simplices {
                    self.graph.facet_mut(apex_id).simplices.push(crate::triangulation::IncidentSimplex {
                        simplex: inc.simplex,
                        opposite_vertex: p,
                    });
                }
            }
        }

        self.vertices_so_far.insert(p);
        self.valid_facet = Some(apex_id);

        if self.ah.rows() == 0 {
            self.state = State::FullDim;
            self.compute_all_normals_full_dim();
        }
    }

    /// Shared visibility-search entry point for `low_dim` (point already in
    /// AH) and `full_dim`.
    fn add_point_general(&mut self, p: usize) -> Result<StepOutcome, EngineError> {
        let pv = self.effective.points.row(p).clone();
        let start = match self.valid_facet {
            Some(f) if self.graph.node_count() > 0 => f,
            _ => self.graph.node_ids().into_iter().next().expect("at least one facet exists"),
        };

        let mut visited: BTreeSet<FacetId> = BTreeSet::new();
        let mut queue: VecDeque<FacetId> = VecDeque::new();
        queue.push_back(start);
        visited.insert(start);

        let mut found: Option<FacetId> = None;
        while let Some(f) = queue.pop_front() {
            let s = self.orientation_of(f, &pv);
            self.graph.facet_mut(f).orientation = s;
            if s <= 0 {
                found = Some(f);
                break;
            }
            let mut best: Option<(FacetId, Scalar)> = None;
            for g in self.graph.adjacent_nodes(f).collect::<Vec<_>>() {
                if visited.contains(&g) {
                    continue;
                }
                let score = self.descent_score(g, &pv);
                if best.as_ref().map_or(true, |(_, b)| score < *b) {
                    best = Some((g, score));
                }
            }
            match best {
                Some((g, _)) => {
                    visited.insert(g);
                    queue.push_back(g);
                }
                None => {
                    if let Some(next) = self.graph.node_ids().into_iter().find(|n| !visited.contains(n)) {
                        visited.insert(next);
                        queue.push_back(next);
                    }
                }
            }
        }

        match found {
            Some(seed) => self.update_facets(seed, p, &pv, visited),
            None => self.mark_interior_or_fail(p),
        }
    }

    fn orientation_of(&self, f: FacetId, pv: &Vector) -> i8 {
        let normal = self
            .graph
            .facet(f)
            .normal
            .clone()
            .unwrap_or_else(|| self.compute_normal_on_demand(f));
        sign(&dot(&normal, pv))
    }

    fn compute_normal_on_demand(&self, f: FacetId) -> Vector {
        let reference = self.any_vertex_outside(f);
        let nullspace = self.facet_nullspace();
        let mut ns = nullspace.clone();
        for &v in &self.graph.facet(f).vertices {
            reduce_nullspace(&mut ns, self.effective.points.row(v));
        }
        let mut normal = ns.row(0).clone();
        if sign(&dot(&normal, &reference)) < 0 {
            normal = normal.negate();
        }
        normal
    }

    fn descent_score(&self, f: FacetId, pv: &Vector) -> Scalar {
        let normal = self
            .graph
            .facet(f)
            .normal
            .clone()
            .unwrap_or_else(|| self.compute_normal_on_demand(f));
        let sqr_normal = self.graph.facet(f).sqr_normal.clone().unwrap_or_else(|| crate::field::sqr(&normal));
        let s = dot(&normal, pv);
        (&s * &s) / sqr_normal
    }

    /// BFS-over-visibility phase. Returns a `Restart` outcome if a new
    /// lineality direction was discovered.
    fn update_facets(
        &mut self,
        seed: FacetId,
        p: usize,
        pv: &Vector,
        visited: BTreeSet<FacetId>,
    ) -> Result<StepOutcome, EngineError> {
        let dim_poly = self.effective.dim.saturating_sub(self.ah.rows());
        let mut queue: VecDeque<FacetId> = VecDeque::new();
        let mut visited = visited;
        let mut incident_facets: Vec<FacetId> = Vec::new();
        // The descent walk already touched every facet in `visited` besides
        // the seed, all with positive orientation: a valid facet has
        // already been seen unless the walk never left the seed.
        let mut seen_valid = visited.len() > 1;
        let mut any_violated = false;
        let mut to_delete: Vec<FacetId> = Vec::new();

        queue.push_back(seed);
        visited.insert(seed);
        if self.graph.facet(seed).orientation == 0 {
            incident_facets.push(seed);
            self.graph.facet_mut(seed).vertices.insert(p);
            self.generic_position = false;
        }

        while let Some(f) = queue.pop_front() {
            let orientation = self.graph.facet(f).orientation;
            if orientation < 0 {
                any_violated = true;
                let new_start = self.arena.len();
                if self.options.make_triangulation {
                    let simplices = self.graph.facet(f).simplices.clone();
                    for inc in simplices {
                        let mut s = self.arena.get(inc.simplex).clone();
                        s.remove(&inc.opposite_vertex);
                        s.insert(p);
                        self.arena.push(s);
                    }
                }

                let neighbors: Vec<(_, FacetId)> = self.graph.out_edges(f).collect();
                for (edge, g) in neighbors {
                    if !visited.contains(&g) {
                        visited.insert(g);
                        let s = self.orientation_of(g, pv);
                        self.graph.facet_mut(g).orientation = s;
                        if s == 0 {
                            self.graph.facet_mut(g).vertices.insert(p);
                            incident_facets.push(g);
                            self.generic_position = false;
                        } else if s < 0 {
                            queue.push_back(g);
                        } else {
                            seen_valid = true;
                        }
                    }
                    let g_orientation = self.graph.facet(g).orientation;
                    if g_orientation > 0 {
                        let ridge = self.graph.ridge(edge).clone();
                        let mut new_vertices = ridge;
                        new_vertices.insert(p);
                        let new_facet = FacetData::new(new_vertices);
                        let new_id = self.graph.add_node(new_facet);
                        self.compute_normal_for(new_id);
                        let old_ridge = self.graph.ridge(edge).clone();
                        self.graph.add_edge(new_id, g, old_ridge);
                        incident_facets.push(new_id);
                        if self.options.make_triangulation {
                            let ids: Vec<_> = self.arena.ids_from(new_start).collect();
                            self.graph.facet_mut(new_id).add_incident_simplices(&self.arena, ids.into_iter());
                        }
                    } else if g_orientation == 0 && self.options.make_triangulation {
                        let ids: Vec<_> = self.arena.ids_from(new_start).collect();
                        self.graph.facet_mut(g).add_incident_simplices(&self.arena, ids.into_iter());
                    }
                }
                to_delete.push(f);
            } else {
                let f_incident = orientation == 0;
                let neighbors: Vec<(_, FacetId)> = self.graph.out_edges(f).collect();
                for (edge, g) in neighbors {
                    if !visited.contains(&g) {
                        visited.insert(g);
                        let s = self.orientation_of(g, pv);
                        self.graph.facet_mut(g).orientation = s;
                        if s == 0 {
                            self.graph.facet_mut(g).vertices.insert(p);
                            incident_facets.push(g);
                            self.generic_position = false;
                        } else if s < 0 {
                            queue.push_back(g);
                        } else {
                            seen_valid = true;
                        }
                    }
                    // Both f and g are incident (p lies on their shared
                    // ridge): the ridge already connecting them needs p too,
                    // since connect_ridges skips pairs with an existing edge.
                    if f_incident && self.graph.facet(g).orientation == 0 {
                        self.graph.ridge_mut(edge).insert(p);
                    }
                }
            }
        }

        for f in &to_delete {
            self.graph.delete_node(*f);
        }

        trace!(violated = any_violated, incident = incident_facets.len(), "update_facets BFS done");

        if !any_violated {
            return self.mark_interior_or_fail(p);
        }
        if !seen_valid && self.options.expect_redundant {
            let pv_owned = pv.clone();
            return Ok(self.process_new_lineality(p, &incident_facets, pv_owned));
        }

        self.connect_ridges(&incident_facets, dim_poly);

        self.vertices_so_far.insert(p);
        if let Some(&last) = incident_facets.last() {
            self.valid_facet = Some(last);
        }

        #[cfg(debug_assertions)]
        self.check_incidence();

        Ok(StepOutcome::Continue)
    }

    /// For every vertex processed so far and every facet with a computed
    /// normal: the vertex is incident to the facet iff `normal . vertex ==
    /// 0`, and otherwise `normal . vertex > 0`. Logs before panicking so a
    /// failure in a larger run is diagnosable from the trace, not just the
    /// assertion site.
    #[cfg(debug_assertions)]
    fn check_incidence(&self) {
        for id in self.graph.node_ids() {
            let facet = self.graph.facet(id);
            let normal = match &facet.normal {
                Some(n) => n.clone(),
                None => continue,
            };
            for &v in &self.vertices_so_far {
                let s = sign(&dot(&normal, self.effective.points.row(v)));
                let incident = facet.vertices.contains(&v);
                let ok = if incident { s == 0 } else { s > 0 };
                if !ok {
                    error!(vertex = v, sign = s, incident, "facet/vertex incidence invariant violated");
                }
                debug_assert!(ok, "facet/vertex incidence invariant violated");
            }
        }
    }

    fn compute_normal_for(&mut self, id: FacetId) {
        if self.state == State::FullDim {
            let reference = self.any_vertex_outside(id);
            let points = self.effective.points.clone();
            self.graph.facet_mut(id).coord_full_dim(&points, &reference);
        } else {
            let reference = self.any_vertex_outside(id);
            let nullspace = self.facet_nullspace();
            let points = self.effective.points.clone();
            self.graph.facet_mut(id).coord_low_dim(&nullspace, &points, &reference);
        }
    }

    /// Ridge creation among this step's incident facets.
    fn connect_ridges(&mut self, incident_facets: &[FacetId], dim_poly: usize) {
        let min_ridge_size = dim_poly.saturating_sub(1);
        for i in 0..incident_facets.len() {
            for j in (i + 1)..incident_facets.len() {
                let f = incident_facets[i];
                let g = incident_facets[j];
                if self.graph.edge_exists(f, g) {
                    continue;
                }
                let r: Ridge = self
                    .graph
                    .facet(f)
                    .vertices
                    .intersection(&self.graph.facet(g).vertices)
                    .copied()
                    .collect();
                if r.len() < min_ridge_size {
                    continue;
                }
                let out_edges: Vec<_> = self.graph.out_edges(f).collect();
                let mut covered = false;
                let mut to_remove = Vec::new();
                for (edge, _neighbor) in out_edges {
                    let existing = self.graph.ridge(edge).clone();
                    if existing.is_subset(&r) {
                        to_remove.push(edge);
                    } else if r.is_subset(&existing) {
                        covered = true;
                    }
                }
                for edge in to_remove {
                    self.graph.remove_edge(edge);
                }
                if !covered {
                    self.graph.add_edge(f, g, r);
                }
            }
        }
    }

    /// New lineality discovered from an opposite-sign collinear pair in
    /// state `One`.
    fn process_new_lineality_from_direction(&mut self, direction: Vector) -> StepOutcome {
        self.restart_with_new_lineality(vec![direction])
    }

    /// New lineality discovered by `update_facets` finding no valid facet.
    /// The candidate restart points are the vertices of the incident facets
    /// that are not shared by *every* incident facet: we take the
    /// union-minus-intersection of `incident_facets`' vertex sets as the
    /// candidate set, which reduces to the documented behavior for the
    /// two-facet case (see `DESIGN.md`).
    fn process_new_lineality(&mut self, p: usize, incident_facets: &[FacetId], direction: Vector) -> StepOutcome {
        if incident_facets.is_empty() {
            let candidates: Vec<usize> = self.vertices_so_far.iter().copied().collect();
            self.interior_points.insert(p);
            return self.restart_with_new_lineality_and_candidates(vec![direction], candidates);
        }

        let mut intersection = self.graph.facet(incident_facets[0]).vertices.clone();
        let mut union = intersection.clone();
        for f in &incident_facets[1..] {
            let v = &self.graph.facet(*f).vertices;
            intersection = intersection.intersection(v).copied().collect();
            union = union.union(v).copied().collect();
        }
        let candidates: Vec<usize> = union.difference(&intersection).copied().collect();

        for v in &intersection {
            self.promoted_points.push(*v);
        }
        self.interior_points.insert(p);
        self.restart_with_new_lineality_and_candidates(vec![direction], candidates)
    }

    fn restart_with_new_lineality(&mut self, directions: Vec<Vector>) -> StepOutcome {
        let candidates: Vec<usize> = self.vertices_so_far.iter().copied().collect();
        self.restart_with_new_lineality_and_candidates(directions, candidates)
    }

    fn restart_with_new_lineality_and_candidates(&mut self, directions: Vec<Vector>, candidates: Vec<usize>) -> StepOutcome {
        let mut new_linealities = self.source_linealities.clone();
        for d in directions {
            // Embed the effective-space direction back into ambient
            // coordinates via the current back-transform before folding it
            // into the (ambient-dimension) source lineality matrix.
            let embedded = embed_direction(&d, &self.effective);
            new_linealities.push_row(embedded);
        }
        self.source_linealities = new_linealities;

        let effective = match lineality::reduce(
            &self.source_points,
            &self.source_linealities,
            self.ambient_dim,
            true,
        ) {
            Some(r) => r,
            None => return StepOutcome::Degenerate,
        };
        let dim = effective.dim;
        self.effective = effective;
        self.ah = Matrix::identity(dim);
        self.graph.clear();
        self.arena.clear();
        self.vertices_so_far.clear();
        self.v0 = None;
        self.valid_facet = None;
        self.state = State::Zero;

        StepOutcome::Restart(candidates)
    }
}

/// Zero-pad an effective-space row back to ambient dimension and apply the
/// inverse of the current projection, recovering an ambient-space vector
/// suitable for appending to `source_linealities`.
fn embed_direction(d: &Vector, effective: &Reduction) -> Vector {
    let mut padded = d.0.clone();
    padded.resize(effective.back.cols(), num_traits::Zero::zero());
    let v = Vector(padded);
    effective.back.transpose().apply_row(&v)
}
