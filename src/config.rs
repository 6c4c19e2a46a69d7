//! Pipeline Configuration
//!
//! Parameter sets for the two local-homology pipelines, with defaults and
//! validation.

use crate::error::{LocalHomologyError, Result};
use crate::local::boundary::BoundaryPolicy;
use crate::local::check_radius;

/// Parameters of the coning pipeline
#[derive(Debug, Clone)]
pub struct ConedConfig {
    /// Radius ε of the neighborhood ball
    pub epsilon: f64,
    /// Highest homology degree reported
    pub max_dimension: usize,
    /// How local points connect to the coning vertex
    pub policy: BoundaryPolicy,
}

impl Default for ConedConfig {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            max_dimension: 1,
            policy: BoundaryPolicy::Expanding,
        }
    }
}

impl ConedConfig {
    pub fn new(epsilon: f64, max_dimension: usize, policy: BoundaryPolicy) -> Self {
        Self {
            epsilon,
            max_dimension,
            policy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_radius(self.epsilon)
    }
}

/// Parameters of the R-filtration pipeline
#[derive(Debug, Clone)]
pub struct RFiltrationConfig {
    /// Edges join points closer than α
    pub alpha: f64,
    /// Highest homology degree reported; the complex is expanded to it
    pub max_dimension: usize,
    /// Points farther than this from x₀ are dropped
    pub max_r: Option<f64>,
}

impl Default for RFiltrationConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            max_dimension: 1,
            max_r: None,
        }
    }
}

impl RFiltrationConfig {
    pub fn new(alpha: f64, max_dimension: usize, max_r: Option<f64>) -> Self {
        Self {
            alpha,
            max_dimension,
            max_r,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(LocalHomologyError::InvalidScale {
                name: "alpha",
                value: self.alpha,
                expected: "> 0",
            });
        }
        if let Some(max_r) = self.max_r {
            if max_r.is_nan() || max_r < 0.0 {
                return Err(LocalHomologyError::InvalidScale {
                    name: "max_r",
                    value: max_r,
                    expected: ">= 0",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConedConfig::default().validate().is_ok());
        assert!(RFiltrationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let coned = ConedConfig::new(0.0, 1, BoundaryPolicy::Plain);
        assert_eq!(
            coned.validate(),
            Err(LocalHomologyError::InvalidRadius { radius: 0.0 })
        );
        assert!(ConedConfig::new(f64::NAN, 1, BoundaryPolicy::Plain)
            .validate()
            .is_err());

        assert!(RFiltrationConfig::new(-1.0, 1, None).validate().is_err());
        assert!(RFiltrationConfig::new(0.5, 1, Some(-0.1)).validate().is_err());
        assert!(RFiltrationConfig::new(0.5, 1, Some(f64::INFINITY))
            .validate()
            .is_ok());
    }
}
