//! Ball Membership
//!
//! Which samples fall in the closed ball B(center, ε), and how far each
//! one is from the ball's boundary sphere.

use ndarray::{Array1, Array2};

use crate::topology::distances_to;

/// Membership of every sample in a closed ball
#[derive(Debug, Clone)]
pub struct BallMembership {
    /// `mask[i]` iff sample i lies in the ball (boundary included)
    pub mask: Vec<bool>,
    /// ε - ‖pᵢ - center‖ for every sample; negative outside the ball
    pub boundary_distance: Array1<f64>,
}

impl BallMembership {
    /// Indices of samples inside the ball, in input order
    pub fn inside(&self) -> Vec<usize> {
        (0..self.mask.len()).filter(|&i| self.mask[i]).collect()
    }

    /// Indices of samples outside the ball, in input order
    pub fn outside(&self) -> Vec<usize> {
        (0..self.mask.len()).filter(|&i| !self.mask[i]).collect()
    }

    pub fn n_inside(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }
}

/// Determine which samples lie in B(center, ε).
///
/// A non-positive ε gives an empty (or boundary-only) ball; rejecting it is
/// left to the pipelines.
pub fn membership(points: &Array2<f64>, center: &Array1<f64>, epsilon: f64) -> BallMembership {
    let boundary_distance = distances_to(points, center).mapv(|d| epsilon - d);
    let mask = boundary_distance.iter().map(|&b| b >= 0.0).collect();
    BallMembership {
        mask,
        boundary_distance,
    }
}
