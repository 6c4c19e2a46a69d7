//! Local Homology Estimation
//!
//! Estimates the homology of a small neighborhood of a query point x₀,
//! relative to the neighborhood's boundary, from a finite sample.
//!
//! ## Two Strategies
//!
//! - **Coning** (`coning.rs`): keep the points of the ε-ball around x₀, add
//!   one synthetic vertex standing for the boundary, connect it to every
//!   local point at a policy-defined distance (`boundary.rs`) and compute
//!   ordinary persistence. The coning vertex is present at all scales.
//!
//! - **R-filtration** (`r_filtration.rs`): filter a Rips complex by the
//!   negated distance to x₀ and read local homology off the ordinary part
//!   of its extended persistence through the Symmetry Corollary
//!   (`duality.rs`).
//!
//! ## Reference
//!
//! Skraba & Wang (2014). "Approximating Local Homology from Samples".
//! Proceedings of SODA, 174-192.

pub mod ball;
pub mod boundary;
pub mod coning;
pub mod duality;
pub mod r_filtration;

use ndarray::{Array1, Array2};

use crate::error::{LocalHomologyError, Result};

/// Query point must live in the point cloud's ambient space
pub(crate) fn check_query(points: &Array2<f64>, x0: &Array1<f64>) -> Result<()> {
    if points.ncols() != x0.len() {
        return Err(LocalHomologyError::DimensionMismatch {
            expected: points.ncols(),
            found: x0.len(),
        });
    }
    Ok(())
}

/// Ball radius must be finite and strictly positive
pub(crate) fn check_radius(epsilon: f64) -> Result<()> {
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(LocalHomologyError::InvalidRadius { radius: epsilon });
    }
    Ok(())
}
