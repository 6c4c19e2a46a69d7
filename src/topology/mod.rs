//! Topology Module: Filtered Complexes and Persistent Homology
//!
//! Implements the complex primitive the local-homology pipelines build on:
//! - Filtered simplicial complexes with tagged filtration values
//! - Vietoris-Rips construction from distance matrices
//! - Persistent homology (standard algorithm) and extended persistence
//!
//! ## Mathematical Background
//!
//! A filtration assigns each simplex the scale at which it enters the
//! complex, with faces entering no later than their cofaces. Persistent
//! homology tracks the birth and death of topological features
//! (components, loops, voids) across this filtration.

mod persistence;
mod simplex_tree;
mod vietoris_rips;

pub use persistence::{ExtendedDiagrams, PersistenceDiagram, PersistencePair};
pub use simplex_tree::{Filtration, SimplexTree};
pub use vietoris_rips::{compute_distance_matrix, distances_to, euclidean, VietorisRips};
