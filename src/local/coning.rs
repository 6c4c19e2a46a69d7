//! Coned Local Complexes
//!
//! The points of B(x₀, ε) plus one coning vertex ω standing for everything
//! outside the ball. Persistent homology of this complex, with ω present
//! from the start, approximates the local homology H(B, ∂B) at x₀.
//!
//! ## Construction
//!
//! ```text
//!            local points     ω
//!          ┌───────────────┬─────┐
//!   local  │       D       │  b  │
//!          ├───────────────┼─────┤
//!   ω      │      bᵀ       │  0  │
//!          └───────────────┴─────┘
//! ```
//!
//! D holds the pairwise distances inside the ball and b the policy's
//! coning distances. The Rips complex of this matrix is expanded one
//! dimension past the highest reported degree, then ω alone is moved to
//! `Filtration::AlwaysPresent`; its edges and cofaces keep their Rips values.

use ndarray::{s, Array1, Array2};
use tracing::debug;

use super::boundary::{BoundaryDistance, BoundaryPolicy, LocalDistances};
use super::check_query;
use crate::config::ConedConfig;
use crate::error::{LocalHomologyError, Region, Result};
use crate::topology::{Filtration, PersistenceDiagram, SimplexTree, VietorisRips};

/// A coned local complex and its vertex bookkeeping
#[derive(Debug, Clone)]
pub struct ConedComplex {
    /// The filtered complex
    pub tree: SimplexTree,
    /// Vertex id of the coning vertex (the number of local points)
    pub cone_vertex: usize,
    /// Input index of every other vertex: vertex v is point `indices[v]`
    pub indices: Vec<usize>,
}

/// Local distances with the coning vertex appended as the last row and column
pub fn augmented_distance_matrix(local: &LocalDistances) -> Array2<f64> {
    let n = local.len();
    let mut augmented = Array2::<f64>::zeros((n + 1, n + 1));
    augmented.slice_mut(s![..n, ..n]).assign(&local.local);
    augmented.slice_mut(s![..n, n]).assign(&local.cone);
    augmented.slice_mut(s![n, ..n]).assign(&local.cone);
    augmented
}

/// Build the coned complex of B(center, ε), expanded to `max_dimension`.
///
/// Pass one more than the highest homology degree of interest: the top
/// simplices only serve to kill classes one degree below.
pub fn build_coned_complex<P: BoundaryDistance + ?Sized>(
    points: &Array2<f64>,
    center: &Array1<f64>,
    epsilon: f64,
    max_dimension: usize,
    policy: &P,
) -> Result<ConedComplex> {
    super::check_radius(epsilon)?;
    check_query(points, center)?;

    let local = policy.local_distances(points, center, epsilon)?;
    if local.is_empty() {
        return Err(LocalHomologyError::EmptyNeighborhood {
            region: Region::Ball,
            radius: epsilon,
        });
    }

    let augmented = augmented_distance_matrix(&local);
    let mut tree =
        VietorisRips::from_distance_matrix(&augmented)?.create_simplex_tree(max_dimension);

    let cone_vertex = local.len();
    tree.assign_filtration(&[cone_vertex], Filtration::AlwaysPresent)?;

    debug!(
        n_local = local.len(),
        max_dimension,
        simplices = tree.num_simplices(),
        "built coned complex"
    );
    Ok(ConedComplex {
        tree,
        cone_vertex,
        indices: local.indices,
    })
}

/// Keep pairs of degree at most `max_dimension` born at a non-negative scale.
///
/// This drops the class of the coning vertex, which is born before every
/// finite scale.
pub fn filter_diagram(diagram: &PersistenceDiagram, max_dimension: usize) -> PersistenceDiagram {
    diagram
        .iter()
        .filter(|p| p.dimension <= max_dimension && p.birth >= 0.0)
        .copied()
        .collect()
}

/// Local homology of `points` at `x0` through a coned complex
pub fn compute_local_homology_coned(
    points: &Array2<f64>,
    x0: &Array1<f64>,
    epsilon: f64,
    max_dimension: usize,
    policy: BoundaryPolicy,
) -> Result<PersistenceDiagram> {
    compute_local_homology_coned_with(
        points,
        x0,
        &ConedConfig::new(epsilon, max_dimension, policy),
    )
}

/// Local homology of `points` at `x0` through a coned complex, configured
pub fn compute_local_homology_coned_with(
    points: &Array2<f64>,
    x0: &Array1<f64>,
    config: &ConedConfig,
) -> Result<PersistenceDiagram> {
    config.validate()?;

    let complex = build_coned_complex(
        points,
        x0,
        config.epsilon,
        config.max_dimension + 1,
        &config.policy,
    )?;
    let diagram = filter_diagram(&complex.tree.persistence(), config.max_dimension);

    debug!(
        policy = ?config.policy,
        pairs = diagram.len(),
        top_degree = ?diagram.max_dimension(),
        "coned local homology"
    );
    Ok(diagram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::PersistencePair;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_augmented_matrix_layout() {
        let points = array![[0.0, 0.0], [0.1, 0.0], [5.0, 0.0]];
        let local = BoundaryPolicy::Plain
            .local_distances(&points, &array![0.0, 0.0], 1.0)
            .unwrap();
        let aug = augmented_distance_matrix(&local);

        assert_eq!(aug.dim(), (3, 3));
        assert_relative_eq!(aug[[0, 1]], 0.1, epsilon = 1e-12);
        assert_relative_eq!(aug[[0, 2]], 1.0);
        assert_relative_eq!(aug[[2, 1]], 0.9, epsilon = 1e-12);
        assert_eq!(aug, aug.t());
        assert!(aug.diag().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_cone_vertex_is_always_present() {
        let points = array![[0.0, 0.0], [0.3, 0.0], [0.0, 0.4], [3.0, 3.0]];
        let center = array![0.0, 0.0];
        let complex =
            build_coned_complex(&points, &center, 1.0, 2, &BoundaryPolicy::Plain).unwrap();

        assert_eq!(complex.cone_vertex, 3);
        assert_eq!(complex.indices, vec![0, 1, 2]);
        assert_eq!(
            complex.tree.filtration(&[3]),
            Some(Filtration::AlwaysPresent)
        );
        // Edges to the cone keep their coning distance
        assert_eq!(complex.tree.filtration(&[0, 3]), Some(Filtration::Value(1.0)));

        let others_min = complex
            .tree
            .iter()
            .filter(|(s, _)| s.len() > 1 || s[0] != 3)
            .map(|(_, f)| f)
            .min()
            .unwrap();
        assert!(Filtration::AlwaysPresent < others_min);
    }

    #[test]
    fn test_two_close_points() {
        let points = array![[0.0, 0.0], [0.1, 0.0]];
        let pd =
            compute_local_homology_coned(&points, &array![0.0, 0.0], 1.0, 0, BoundaryPolicy::Plain)
                .unwrap();

        let h0 = pd.dim(0);
        assert_eq!(h0.len(), 2);
        assert!(h0.iter().all(|p| p.birth == 0.0));
        let mut deaths: Vec<f64> = h0.iter().map(|p| p.death).collect();
        deaths.sort_by(f64::total_cmp);
        assert_relative_eq!(deaths[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(deaths[1], 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_filter_drops_cone_class_and_is_idempotent() {
        let diagram = PersistenceDiagram::from_pairs(vec![
            PersistencePair::new(0, f64::NEG_INFINITY, f64::INFINITY),
            PersistencePair::new(0, 0.0, 0.5),
            PersistencePair::new(1, 0.2, 0.7),
            PersistencePair::new(2, 0.3, 0.4),
        ]);

        let once = filter_diagram(&diagram, 1);
        assert_eq!(once.len(), 2);
        assert!(once.iter().all(|p| p.birth >= 0.0 && p.dimension <= 1));
        assert_eq!(filter_diagram(&once, 1), once);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let points = array![[0.0, 0.0], [0.1, 0.0]];

        assert!(matches!(
            compute_local_homology_coned(&points, &array![0.0, 0.0], 0.0, 0, BoundaryPolicy::Plain),
            Err(LocalHomologyError::InvalidRadius { .. })
        ));
        assert!(matches!(
            compute_local_homology_coned(
                &points,
                &array![0.0, 0.0, 0.0],
                1.0,
                0,
                BoundaryPolicy::Plain
            ),
            Err(LocalHomologyError::DimensionMismatch { expected: 2, found: 3 })
        ));
        assert!(matches!(
            compute_local_homology_coned(&points, &array![9.0, 9.0], 1.0, 0, BoundaryPolicy::Plain),
            Err(LocalHomologyError::EmptyNeighborhood { region: Region::Ball, .. })
        ));
    }
}
