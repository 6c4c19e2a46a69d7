//! Symmetry Corollary
//!
//! Relative persistence of a function f in degree k is read off the
//! ordinary persistence of -f in degree k - 1: a pair (b, d) of -f becomes
//! the pair (-d, -b) of f one degree up.
//!
//! A class of -f that never dies has no finite counterpart; it is mapped to
//! birth 0. This is a representation convention for finite output, not a
//! consequence of the duality.

use tracing::trace;

use crate::topology::{PersistenceDiagram, PersistencePair};

/// Map the ordinary diagram of -f to the relative diagram of f
pub fn dualize(ordinary: &PersistenceDiagram) -> PersistenceDiagram {
    ordinary
        .iter()
        .map(|p| {
            let birth = if p.death.is_finite() { -p.death } else { 0.0 };
            PersistencePair::new(p.dimension + 1, birth, -p.birth)
        })
        .collect()
}

/// Inverse of [`dualize`] on pairs with finite coordinates.
///
/// Degree-0 pairs have no ordinary counterpart and are dropped.
pub fn undualize(relative: &PersistenceDiagram) -> PersistenceDiagram {
    relative
        .iter()
        .filter_map(|p| {
            let Some(dimension) = p.dimension.checked_sub(1) else {
                trace!(birth = p.birth, death = p.death, "dropping degree-0 relative pair");
                return None;
            };
            Some(PersistencePair::new(dimension, -p.death, -p.birth))
        })
        .collect()
}

/// Number of relative classes in each degree `0..=max_dimension`
pub fn relative_betti_numbers(relative: &PersistenceDiagram, max_dimension: usize) -> Vec<usize> {
    let mut betti = vec![0; max_dimension + 1];
    for pair in relative.iter().filter(|p| p.dimension <= max_dimension) {
        betti[pair.dimension] += 1;
    }
    betti
}
