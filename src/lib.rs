//! # Local Homology
//!
//! Estimating the Local Topology of Point Clouds from Samples
//!
//! ## Theoretical Framework
//!
//! The local homology of a space X at a point x₀ is the homology of a small
//! neighborhood of x₀ relative to the neighborhood's boundary,
//! H(X ∩ B(x₀, ε), X ∩ ∂B(x₀, ε)). It tells a manifold point from a
//! boundary point, a crossing or a branch, which global homology cannot.
//!
//! ### Methodology
//!
//! 1. **Coning**: build a Rips complex on the samples inside B(x₀, ε) plus
//!    one vertex standing for the boundary, present at every scale. Ordinary
//!    persistence of this coned complex approximates the relative homology.
//!    Three policies decide how a sample connects to the boundary vertex.
//!
//! 2. **R-filtration**: filter a Rips complex by the negated distance to x₀
//!    and compute extended persistence. By the Symmetry Corollary, the
//!    ordinary pairs in degree k-1 give the relative pairs in degree k.
//!
//! ## Example
//!
//! ```rust
//! use local_homology::{compute_local_homology_coned, BoundaryPolicy};
//! use ndarray::array;
//!
//! let points = array![[0.0, 0.0], [0.1, 0.0]];
//! let x0 = array![0.0, 0.0];
//! let diagram =
//!     compute_local_homology_coned(&points, &x0, 1.0, 0, BoundaryPolicy::Plain).unwrap();
//! assert!(diagram.dim(0).iter().any(|p| p.birth == 0.0));
//! ```
//!
//! ## References
//!
//! - Skraba & Wang, "Approximating Local Homology from Samples", SODA (2014)
//! - Cohen-Steiner, Edelsbrunner & Harer, "Extending Persistence Using
//!   Poincaré and Lefschetz Duality", FoCM (2009)
//! - Edelsbrunner & Harer, "Computational Topology" (2010)

pub mod config;
pub mod datasets;
pub mod error;
pub mod local;
pub mod topology;

// Re-exports from topology
pub use topology::{
    // Complex primitive
    Filtration,
    SimplexTree,
    VietorisRips,
    // Persistence
    ExtendedDiagrams,
    PersistenceDiagram,
    PersistencePair,
};

// Re-exports from local
pub use local::{
    ball::{membership, BallMembership},
    boundary::{BoundaryDistance, BoundaryPolicy, Expanding, LocalDistances, NearestExterior, Plain},
    coning::{
        augmented_distance_matrix, build_coned_complex, compute_local_homology_coned,
        compute_local_homology_coned_with, filter_diagram, ConedComplex,
    },
    duality::{dualize, relative_betti_numbers, undualize},
    r_filtration::{
        build_r_filtration, compute_local_homology_r, compute_local_homology_r_with,
        one_skeleton_edges, RFiltrationComplex,
    },
};

pub use config::{ConedConfig, RFiltrationConfig};
pub use error::{LocalHomologyError, Region, Result};
