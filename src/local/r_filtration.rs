//! R-Filtration Local Homology
//!
//! Filters the Rips complex of the sample by f(x) = -‖x - x₀‖, so the
//! points nearest x₀ enter last. The relative persistence of the distance
//! to x₀ (local homology at x₀) is recovered from the ordinary part of the
//! extended persistence of f through the Symmetry Corollary.
//!
//! ## Construction
//!
//! 1. Vertex value vᵢ = -‖pᵢ - x₀‖; points with ‖pᵢ - x₀‖ > max_r are dropped
//! 2. Edge (i, j) for every pair closer than α, at max(vᵢ, vⱼ)
//! 3. Flag expansion up to `max_dimension`
//!
//! Local homology in degree k comes from ordinary homology of f in degree
//! k - 1, so the complex is expanded to k to resolve degree k - 1.

use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use super::check_query;
use super::duality::dualize;
use crate::config::RFiltrationConfig;
use crate::error::{LocalHomologyError, Region, Result};
use crate::topology::{compute_distance_matrix, distances_to, PersistenceDiagram, SimplexTree};

/// R-filtered complex and its vertex bookkeeping
#[derive(Debug, Clone)]
pub struct RFiltrationComplex {
    /// The filtered complex
    pub tree: SimplexTree,
    /// Input index of every vertex: vertex v is point `indices[v]`
    pub indices: Vec<usize>,
    /// Vertex values, -‖pᵢ - x₀‖
    pub vertex_values: Array1<f64>,
}

/// Build the R-filtered Rips complex of `points` around `x0`
pub fn build_r_filtration(
    points: &Array2<f64>,
    x0: &Array1<f64>,
    alpha: f64,
    max_dimension: usize,
    max_r: Option<f64>,
) -> Result<RFiltrationComplex> {
    RFiltrationConfig::new(alpha, max_dimension, max_r).validate()?;
    check_query(points, x0)?;

    let dist_to_x0 = distances_to(points, x0);
    let indices: Vec<usize> = (0..points.nrows())
        .filter(|&i| max_r.map_or(true, |r| dist_to_x0[i] <= r))
        .collect();
    if indices.is_empty() {
        return Err(LocalHomologyError::EmptyNeighborhood {
            region: Region::Ball,
            radius: max_r.unwrap_or(f64::INFINITY),
        });
    }

    let vertex_values: Array1<f64> = indices.iter().map(|&i| -dist_to_x0[i]).collect();
    let pairwise = compute_distance_matrix(&points.select(Axis(0), &indices));

    let mut tree = SimplexTree::new();
    for (v, &value) in vertex_values.iter().enumerate() {
        tree.insert(&[v], value);
    }

    let n = indices.len();
    for i in 0..n {
        for j in i + 1..n {
            if pairwise[[i, j]] < alpha {
                tree.insert(&[i, j], vertex_values[i].max(vertex_values[j]));
            }
        }
    }

    tree.expansion(max_dimension);
    debug!(
        n_points = n,
        dropped = points.nrows() - n,
        simplices = tree.num_simplices(),
        "built R-filtration"
    );

    Ok(RFiltrationComplex {
        tree,
        indices,
        vertex_values,
    })
}

/// Edges of the complex as pairs of input point indices
pub fn one_skeleton_edges(complex: &RFiltrationComplex) -> Vec<(usize, usize)> {
    complex
        .tree
        .skeleton(1)
        .into_iter()
        .map(|(edge, _)| (complex.indices[edge[0]], complex.indices[edge[1]]))
        .collect()
}

/// Local homology of `points` at `x0` through the R-filtration
pub fn compute_local_homology_r(
    points: &Array2<f64>,
    x0: &Array1<f64>,
    alpha: f64,
    max_dimension: usize,
    max_r: Option<f64>,
) -> Result<PersistenceDiagram> {
    compute_local_homology_r_with(
        points,
        x0,
        &RFiltrationConfig::new(alpha, max_dimension, max_r),
    )
}

/// Local homology of `points` at `x0` through the R-filtration, configured
pub fn compute_local_homology_r_with(
    points: &Array2<f64>,
    x0: &Array1<f64>,
    config: &RFiltrationConfig,
) -> Result<PersistenceDiagram> {
    let complex = build_r_filtration(
        points,
        x0,
        config.alpha,
        config.max_dimension,
        config.max_r,
    )?;

    let extended = complex.tree.extended_persistence()?;
    let relative = dualize(&extended.ordinary);

    debug!(
        ordinary = extended.ordinary.len(),
        relative = relative.len(),
        "R-filtration local homology"
    );
    Ok(relative)
}
