//! Result extractor (component C6).
//!
//! Assembles the public [`EngineOutput`] out of a finished [`Driver`],
//! undoing the lineality transform on every row-space quantity.

use crate::driver::{Driver, State};
use crate::field::Matrix;
use crate::graph::DualGraph;
use std::collections::BTreeSet;

/// Snapshot of everything a `compute` call produces.
#[derive(Clone, Debug)]
pub struct EngineOutput {
    pub facets: Matrix,
    pub affine_hull: Matrix,
    pub vertices: Matrix,
    pub vertex_facet_incidence: Vec<Vec<bool>>,
    pub dual_graph: DualGraph,
    pub triangulation: Vec<BTreeSet<usize>>,
    pub non_redundant_points: Vec<usize>,
    pub non_redundant_linealities: Vec<usize>,
    pub generic_position: bool,
}

/// Embed a row computed in effective (`d'`-dim) coordinates back into the
/// ambient `d`-dim space: zero-pad for the lineality columns, then apply the
/// back-transform's transpose.
fn embed_rows(rows: &Matrix, driver: &Driver) -> Matrix {
    let back = driver.back_transform();
    let padded = rows.pad_columns(back.cols() - rows.cols());
    padded.mul(&back.transpose())
}

pub fn extract(driver: &Driver, source_points_rows: usize) -> EngineOutput {
    let normals_in_order = driver.graph().normals_in_order();
    let facet_ids: Vec<_> = normals_in_order.iter().map(|&(id, _, _)| id).collect();

    let facet_normals: Vec<crate::field::Vector> = normals_in_order.iter().map(|&(_, n, _)| n.clone()).collect();
    let facets_eff = if facet_normals.is_empty() {
        Matrix::zero(0, driver.dim())
    } else {
        Matrix::from_rows(facet_normals, driver.dim())
    };
    let facets = if driver.dim() == 0 && facet_ids.is_empty() {
        Matrix::zero(0, driver.back_transform().cols())
    } else {
        embed_rows(&facets_eff, driver)
    };

    // Before the first point lands, `ah` is the full-rank identity used
    // internally to seed `reduce_nullspace` — report it as empty rather than
    // claiming every direction is orthogonal to the (nonexistent) hull of
    // zero points.
    let affine_hull = if driver.state() == State::Zero {
        Matrix::zero(0, driver.back_transform().cols())
    } else {
        embed_rows(driver.affine_hull(), driver)
    };

    let non_redundant_points: Vec<usize> = (0..source_points_rows)
        .filter(|i| !driver.interior_points().contains(i))
        .collect();

    let vertices_eff = driver.effective_points().select_rows(&non_redundant_points);
    let vertices = embed_rows(&vertices_eff, driver);

    let vertex_facet_incidence: Vec<Vec<bool>> = facet_ids
        .iter()
        .map(|&id| {
            let facet = driver.graph().facet(id);
            non_redundant_points.iter().map(|p| facet.vertices.contains(p)).collect()
        })
        .collect();

    let triangulation: Vec<BTreeSet<usize>> = driver.arena().in_creation_order().cloned().collect();

    let mut non_redundant_linealities: Vec<usize> = driver.lineality_basis_indices().to_vec();
    non_redundant_linealities.extend(driver.promoted_points().iter().copied());

    EngineOutput {
        facets,
        affine_hull,
        vertices,
        vertex_facet_incidence,
        dual_graph: driver.graph().clone(),
        triangulation,
        non_redundant_points,
        non_redundant_linealities,
        generic_position: driver.generic_position(),
    }
}
