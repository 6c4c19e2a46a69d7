//! Vietoris-Rips Complex Construction
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! Built from a distance matrix, each edge enters the filtration at its
//! length and higher simplices at the length of their longest edge.

use ndarray::{Array1, Array2, ArrayView1};
use tracing::debug;

use super::simplex_tree::SimplexTree;
use crate::error::{LocalHomologyError, Result};

/// Tolerance for the symmetry and zero-diagonal checks
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Vietoris-Rips filtration builder
#[derive(Debug, Clone)]
pub struct VietorisRips {
    /// Distance matrix (validated)
    distances: Array2<f64>,
    /// Edges longer than this are left out
    max_edge_length: f64,
}

impl VietorisRips {
    /// Create from a precomputed distance matrix.
    ///
    /// The matrix must be square and symmetric with a zero diagonal.
    pub fn from_distance_matrix(distances: &Array2<f64>) -> Result<Self> {
        let (rows, cols) = distances.dim();
        if rows != cols {
            return Err(LocalHomologyError::InvalidDistanceMatrix {
                message: format!("expected a square matrix, got {rows}x{cols}"),
            });
        }

        for i in 0..rows {
            if !(distances[[i, i]].abs() <= SYMMETRY_TOLERANCE) {
                return Err(LocalHomologyError::InvalidDistanceMatrix {
                    message: format!("non-zero diagonal entry {} at {i}", distances[[i, i]]),
                });
            }
            for j in i + 1..rows {
                if !((distances[[i, j]] - distances[[j, i]]).abs() <= SYMMETRY_TOLERANCE) {
                    return Err(LocalHomologyError::InvalidDistanceMatrix {
                        message: format!("entries ({i}, {j}) and ({j}, {i}) differ"),
                    });
                }
            }
        }

        Ok(Self {
            distances: distances.clone(),
            max_edge_length: f64::INFINITY,
        })
    }

    /// Create from point cloud (computes distance matrix)
    pub fn from_points(points: &Array2<f64>) -> Self {
        Self {
            distances: compute_distance_matrix(points),
            max_edge_length: f64::INFINITY,
        }
    }

    /// Leave out edges longer than `max_edge_length`
    pub fn with_max_edge_length(mut self, max_edge_length: f64) -> Self {
        self.max_edge_length = max_edge_length;
        self
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    /// Build the 1-skeleton and expand it to `max_dimension`.
    ///
    /// Vertices enter at 0, edges at their length.
    pub fn create_simplex_tree(&self, max_dimension: usize) -> SimplexTree {
        let n = self.n_points();
        let mut st = SimplexTree::new();

        for i in 0..n {
            st.insert(&[i], 0.0);
        }

        if max_dimension >= 1 {
            for i in 0..n {
                for j in i + 1..n {
                    let d = self.distances[[i, j]];
                    if d <= self.max_edge_length {
                        st.insert(&[i, j], d);
                    }
                }
            }
        }

        st.expansion(max_dimension);
        debug!(
            n_points = n,
            max_dimension,
            simplices = st.num_simplices(),
            "built Rips complex"
        );
        st
    }
}

/// Euclidean distance between two points of equal dimension
pub fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Compute Euclidean distance matrix
pub fn compute_distance_matrix(points: &Array2<f64>) -> Array2<f64> {
    let n = points.nrows();
    let dim = points.ncols();

    let mut dm = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in i + 1..n {
            let mut dist_sq = 0.0;
            for d in 0..dim {
                let diff = points[[i, d]] - points[[j, d]];
                dist_sq += diff * diff;
            }
            let dist = dist_sq.sqrt();
            dm[[i, j]] = dist;
            dm[[j, i]] = dist;
        }
    }

    dm
}

/// Distance from every row of `points` to `center`
pub fn distances_to(points: &Array2<f64>, center: &Array1<f64>) -> Array1<f64> {
    points
        .rows()
        .into_iter()
        .map(|row| euclidean(row, center.view()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Filtration;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_triangle() {
        // Equilateral triangle with side 1
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.866]];

        let st = VietorisRips::from_points(&points).create_simplex_tree(2);

        assert_eq!(st.num_simplices(), 7);
        let top = st.filtration(&[0, 1, 2]).unwrap().value();
        assert_relative_eq!(top, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_max_edge_length() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [3.0, 0.0]];

        let st = VietorisRips::from_points(&points)
            .with_max_edge_length(2.0)
            .create_simplex_tree(2);

        assert!(st.contains(&[0, 1]));
        assert!(st.contains(&[1, 2]));
        assert!(!st.contains(&[0, 2]));
        assert_eq!(st.dimension(), Some(1));
        assert_eq!(st.filtration(&[2]), Some(Filtration::Value(0.0)));
    }

    #[test]
    fn test_rejects_malformed_matrices() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert!(VietorisRips::from_distance_matrix(&rect).is_err());

        let asym = array![[0.0, 1.0], [2.0, 0.0]];
        assert!(VietorisRips::from_distance_matrix(&asym).is_err());

        let diag = array![[1.0, 1.0], [1.0, 0.0]];
        assert!(VietorisRips::from_distance_matrix(&diag).is_err());
    }

    #[test]
    fn test_distances_to_center() {
        let points = array![[3.0, 4.0], [0.0, 0.0]];
        let d = distances_to(&points, &array![0.0, 0.0]);
        assert_relative_eq!(d[0], 5.0);
        assert_relative_eq!(d[1], 0.0);
        assert_relative_eq!(euclidean(array![1.0, 1.0].view(), array![4.0, 5.0].view()), 5.0);
    }
}
