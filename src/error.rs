//! Error types shared by the complex primitive and the local-homology pipelines.

use thiserror::Error;

/// Which part of a neighborhood turned out to be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// No sample lies inside the ball (or within `max_r` of the query point).
    Ball,
    /// No sample lies outside the ball.
    Exterior,
}

/// Errors raised by local-homology computations.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum LocalHomologyError {
    /// The ball radius must be finite and strictly positive.
    #[error("Invalid ball radius {radius:?}; expected finite value > 0")]
    InvalidRadius {
        /// Rejected radius.
        radius: f64,
    },

    /// A scale parameter (Rips threshold, cut-off radius, noise level) is out of range.
    #[error("Invalid {name} {value:?}; expected finite value {expected}")]
    InvalidScale {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Human readable constraint.
        expected: &'static str,
    },

    /// The query point does not live in the same ambient space as the cloud.
    #[error("Dimension mismatch: point cloud has dimension {expected}, query point has {found}")]
    DimensionMismatch {
        /// Ambient dimension of the point cloud.
        expected: usize,
        /// Dimension of the query point.
        found: usize,
    },

    /// The neighborhood selection produced no points.
    #[error("Empty neighborhood: no points in the {region:?} region (radius {radius})")]
    EmptyNeighborhood {
        /// Region that was empty.
        region: Region,
        /// Radius that defined the region.
        radius: f64,
    },

    /// A distance matrix handed to the complex builder is malformed.
    #[error("Invalid distance matrix: {message}")]
    InvalidDistanceMatrix {
        /// What was wrong with it.
        message: String,
    },

    /// A simplex referenced by `assign_filtration` is not in the complex.
    #[error("Simplex {simplex:?} is not in the complex")]
    UnknownSimplex {
        /// Sorted vertex list of the missing simplex.
        simplex: Vec<usize>,
    },

    /// Extended persistence needs finite vertex values.
    #[error("Non-finite filtration value on simplex {simplex:?}")]
    NonFiniteFiltration {
        /// Offending simplex.
        simplex: Vec<usize>,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LocalHomologyError>;
