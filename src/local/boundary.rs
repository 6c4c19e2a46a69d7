//! Boundary-Distance Policies
//!
//! A policy turns the points of an ε-ball into the two inputs of the coned
//! complex: the pairwise distances between local points, and the distance
//! from each local point to the coning vertex that stands for the rest of
//! space.
//!
//! - [`Plain`]: the coning vertex sits on the boundary sphere; a point
//!   connects to it at its distance to the sphere.
//! - [`Expanding`]: the boundary grows inward at the same rate as the
//!   balls around the samples, so the connection happens at half that
//!   distance (Čech-style meeting of two growing balls).
//! - [`NearestExterior`]: the coning vertex is the closest sample outside
//!   the ball.
//!
//! [`BoundaryPolicy`] selects one of the three at runtime.

use ndarray::{Array1, Array2, Axis};
use tracing::trace;

use super::ball::{membership, BallMembership};
use crate::error::{LocalHomologyError, Region, Result};
use crate::topology::{compute_distance_matrix, euclidean};

/// Local distances handed to the coned complex assembler
#[derive(Debug, Clone)]
pub struct LocalDistances {
    /// Pairwise distances between the points inside the ball (n × n)
    pub local: Array2<f64>,
    /// Distance from each local point to the coning vertex (n)
    pub cone: Array1<f64>,
    /// Input indices of the local points, in vertex order
    pub indices: Vec<usize>,
}

impl LocalDistances {
    /// Number of local points
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Strategy computing the local distance data of an ε-ball
pub trait BoundaryDistance {
    /// Local submatrix and coning column for B(center, ε)
    fn local_distances(
        &self,
        points: &Array2<f64>,
        center: &Array1<f64>,
        epsilon: f64,
    ) -> Result<LocalDistances>;
}

/// Restrict to the ball: membership, local indices, local distance matrix
fn restrict(
    points: &Array2<f64>,
    center: &Array1<f64>,
    epsilon: f64,
) -> (BallMembership, Vec<usize>, Array2<f64>) {
    let ball = membership(points, center, epsilon);
    let indices = ball.inside();
    let local = compute_distance_matrix(&points.select(Axis(0), &indices));
    (ball, indices, local)
}

/// Coning vertex on the boundary sphere
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl BoundaryDistance for Plain {
    fn local_distances(
        &self,
        points: &Array2<f64>,
        center: &Array1<f64>,
        epsilon: f64,
    ) -> Result<LocalDistances> {
        let (ball, indices, local) = restrict(points, center, epsilon);
        let cone = indices.iter().map(|&i| ball.boundary_distance[i]).collect();
        Ok(LocalDistances { local, cone, indices })
    }
}

/// Boundary expanding inward as fast as the sample balls grow
#[derive(Debug, Clone, Copy, Default)]
pub struct Expanding;

impl BoundaryDistance for Expanding {
    fn local_distances(
        &self,
        points: &Array2<f64>,
        center: &Array1<f64>,
        epsilon: f64,
    ) -> Result<LocalDistances> {
        let (ball, indices, local) = restrict(points, center, epsilon);
        let cone = indices
            .iter()
            .map(|&i| ball.boundary_distance[i] / 2.0)
            .collect();
        Ok(LocalDistances { local, cone, indices })
    }
}

/// Coning vertex at the nearest sample outside the ball.
///
/// Fails with `EmptyNeighborhood { region: Ball }` when the ball holds no
/// sample, and with `EmptyNeighborhood { region: Exterior }` when every
/// sample is inside it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestExterior;

impl BoundaryDistance for NearestExterior {
    fn local_distances(
        &self,
        points: &Array2<f64>,
        center: &Array1<f64>,
        epsilon: f64,
    ) -> Result<LocalDistances> {
        let (ball, indices, local) = restrict(points, center, epsilon);
        if indices.is_empty() {
            return Err(LocalHomologyError::EmptyNeighborhood {
                region: Region::Ball,
                radius: epsilon,
            });
        }
        let exterior = ball.outside();
        if exterior.is_empty() {
            return Err(LocalHomologyError::EmptyNeighborhood {
                region: Region::Exterior,
                radius: epsilon,
            });
        }
        trace!(inside = indices.len(), outside = exterior.len(), "nearest exterior");

        let cone = indices
            .iter()
            .map(|&i| {
                exterior
                    .iter()
                    .map(|&j| euclidean(points.row(i), points.row(j)))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        Ok(LocalDistances { local, cone, indices })
    }
}

/// Runtime choice of boundary-distance policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    Plain,
    #[default]
    Expanding,
    NearestExterior,
}

impl BoundaryDistance for BoundaryPolicy {
    fn local_distances(
        &self,
        points: &Array2<f64>,
        center: &Array1<f64>,
        epsilon: f64,
    ) -> Result<LocalDistances> {
        match self {
            BoundaryPolicy::Plain => Plain.local_distances(points, center, epsilon),
            BoundaryPolicy::Expanding => Expanding.local_distances(points, center, epsilon),
            BoundaryPolicy::NearestExterior => {
                NearestExterior.local_distances(points, center, epsilon)
            }
        }
    }
}
