//! Filtered Simplicial Complexes
//!
//! A `SimplexTree` stores every simplex of a complex (as a sorted vertex
//! list) together with its filtration value. The complex is kept closed
//! under taking faces: inserting a simplex inserts all of its faces.
//!
//! ## Filtration Values
//!
//! Values are tagged: `Filtration::AlwaysPresent` sorts strictly below
//! every finite value and marks a simplex that exists at all scales (the
//! coning vertex of a local complex). Everything else is a
//! `Filtration::Value`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::error::{LocalHomologyError, Result};

/// Filtration value attached to a simplex
#[derive(Debug, Clone, Copy)]
pub enum Filtration {
    /// Present before any finite scale
    AlwaysPresent,
    /// Enters the complex at the given scale
    Value(f64),
}

impl Filtration {
    /// Numeric view of the value; `AlwaysPresent` maps to `-inf`
    pub fn value(self) -> f64 {
        match self {
            Filtration::AlwaysPresent => f64::NEG_INFINITY,
            Filtration::Value(v) => v,
        }
    }

    pub fn is_always_present(self) -> bool {
        matches!(self, Filtration::AlwaysPresent)
    }
}

impl From<f64> for Filtration {
    fn from(value: f64) -> Self {
        Filtration::Value(value)
    }
}

impl PartialEq for Filtration {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Filtration {}

impl PartialOrd for Filtration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Filtration {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Filtration::AlwaysPresent, Filtration::AlwaysPresent) => Ordering::Equal,
            (Filtration::AlwaysPresent, Filtration::Value(_)) => Ordering::Less,
            (Filtration::Value(_), Filtration::AlwaysPresent) => Ordering::Greater,
            (Filtration::Value(a), Filtration::Value(b)) => compare_values(*a, *b),
        }
    }
}

/// Numeric order with `-0.0 == 0.0`; NaN falls back to `total_cmp`
pub(crate) fn compare_values(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Filtered simplicial complex, closed under faces
#[derive(Debug, Clone, Default)]
pub struct SimplexTree {
    /// Sorted vertex list -> filtration value
    simplices: BTreeMap<Vec<usize>, Filtration>,
}

/// Sort and deduplicate a vertex list
fn canonical(simplex: &[usize]) -> Vec<usize> {
    let mut vertices = simplex.to_vec();
    vertices.sort_unstable();
    vertices.dedup();
    vertices
}

/// All non-empty faces of a sorted simplex, the simplex itself included
fn faces(vertices: &[usize]) -> impl Iterator<Item = Vec<usize>> + '_ {
    let k = vertices.len();
    (1u64..(1u64 << k)).map(move |mask| {
        vertices
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, &v)| v)
            .collect()
    })
}

impl SimplexTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a simplex and all of its faces.
    ///
    /// Faces that are missing get `filtration`; faces already present keep
    /// the smaller of their current value and `filtration`. Returns `true`
    /// if the simplex itself was not in the complex before.
    pub fn insert(&mut self, simplex: &[usize], filtration: impl Into<Filtration>) -> bool {
        let filtration = filtration.into();
        let vertices = canonical(simplex);
        if vertices.is_empty() {
            return false;
        }

        let is_new = !self.simplices.contains_key(&vertices);
        for face in faces(&vertices) {
            self.simplices
                .entry(face)
                .and_modify(|current| {
                    if filtration < *current {
                        *current = filtration;
                    }
                })
                .or_insert(filtration);
        }
        is_new
    }

    /// Override the filtration value of exactly one simplex.
    ///
    /// Faces and cofaces keep their values, so the result may stop being
    /// monotone; callers own that.
    pub fn assign_filtration(
        &mut self,
        simplex: &[usize],
        filtration: impl Into<Filtration>,
    ) -> Result<()> {
        let vertices = canonical(simplex);
        match self.simplices.get_mut(&vertices) {
            Some(value) => {
                *value = filtration.into();
                Ok(())
            }
            None => Err(LocalHomologyError::UnknownSimplex { simplex: vertices }),
        }
    }

    /// Filtration value of a simplex, if present
    pub fn filtration(&self, simplex: &[usize]) -> Option<Filtration> {
        self.simplices.get(&canonical(simplex)).copied()
    }

    pub fn contains(&self, simplex: &[usize]) -> bool {
        self.simplices.contains_key(&canonical(simplex))
    }

    /// Flag (clique) expansion up to simplices of dimension `max_dimension`.
    ///
    /// A (k+1)-clique of the 1-skeleton becomes a k-simplex whose value is
    /// the maximum over its facets.
    pub fn expansion(&mut self, max_dimension: usize) {
        let mut neighbors: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for simplex in self.simplices.keys().filter(|s| s.len() == 2) {
            neighbors.entry(simplex[0]).or_default().insert(simplex[1]);
            neighbors.entry(simplex[1]).or_default().insert(simplex[0]);
        }

        for dim in 2..=max_dimension {
            let previous: Vec<Vec<usize>> = self
                .simplices
                .keys()
                .filter(|s| s.len() == dim)
                .cloned()
                .collect();
            if previous.is_empty() {
                break;
            }

            let mut added = 0usize;
            for simplex in previous {
                let Some(&last) = simplex.last() else { continue };
                let Some(candidates) = neighbors.get(&last) else { continue };

                for &v in candidates.range(last + 1..) {
                    let is_clique = simplex[..simplex.len() - 1]
                        .iter()
                        .all(|u| neighbors.get(u).is_some_and(|n| n.contains(&v)));
                    if !is_clique {
                        continue;
                    }

                    let mut coface = simplex.clone();
                    coface.push(v);
                    if self.simplices.contains_key(&coface) {
                        continue;
                    }
                    if let Some(value) = self.max_facet_value(&coface) {
                        self.simplices.insert(coface, value);
                        added += 1;
                    }
                }
            }
            trace!(dim, added, "expansion step");
        }
    }

    /// Maximum filtration value over the facets of a simplex, `None` if a facet is missing
    fn max_facet_value(&self, simplex: &[usize]) -> Option<Filtration> {
        let mut max: Option<Filtration> = None;
        for i in 0..simplex.len() {
            let mut facet = simplex.to_vec();
            facet.remove(i);
            let value = *self.simplices.get(&facet)?;
            max = Some(max.map_or(value, |m| m.max(value)));
        }
        max
    }

    /// Dimension of the complex, `None` when empty
    pub fn dimension(&self) -> Option<usize> {
        self.simplices.keys().map(|s| s.len() - 1).max()
    }

    pub fn num_vertices(&self) -> usize {
        self.simplices.keys().filter(|s| s.len() == 1).count()
    }

    pub fn num_simplices(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// All simplices with their values, lexicographic by vertex list
    pub fn iter(&self) -> impl Iterator<Item = (&[usize], Filtration)> + '_ {
        self.simplices.iter().map(|(s, &f)| (s.as_slice(), f))
    }

    /// Simplices of dimension `dim`
    pub fn skeleton(&self, dim: usize) -> Vec<(Vec<usize>, Filtration)> {
        self.simplices
            .iter()
            .filter(|(s, _)| s.len() == dim + 1)
            .map(|(s, &f)| (s.clone(), f))
            .collect()
    }

    /// Simplices in filtration order: value, then dimension, then vertices
    pub fn filtration_order(&self) -> Vec<(Vec<usize>, Filtration)> {
        let mut ordered: Vec<(Vec<usize>, Filtration)> =
            self.simplices.iter().map(|(s, &f)| (s.clone(), f)).collect();
        ordered.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then(a.0.len().cmp(&b.0.len()))
                .then(a.0.cmp(&b.0))
        });
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_present_sorts_first() {
        assert!(Filtration::AlwaysPresent < Filtration::Value(-1e300));
        assert!(Filtration::AlwaysPresent < Filtration::Value(f64::NEG_INFINITY));
        assert_eq!(Filtration::AlwaysPresent.value(), f64::NEG_INFINITY);
        assert!(Filtration::Value(0.5) < Filtration::Value(1.0));
        assert_eq!(Filtration::Value(-0.0), Filtration::Value(0.0));
        assert!(Filtration::AlwaysPresent.is_always_present());
        assert!(!Filtration::from(-1.0).is_always_present());
    }

    #[test]
    fn test_insert_adds_faces() {
        let mut st = SimplexTree::new();
        assert!(st.insert(&[2, 0, 1], 0.7));

        assert_eq!(st.num_simplices(), 7);
        assert_eq!(st.num_vertices(), 3);
        assert_eq!(st.dimension(), Some(2));
        assert_eq!(st.filtration(&[0, 2]), Some(Filtration::Value(0.7)));
    }

    #[test]
    fn test_insert_lowers_existing_faces() {
        let mut st = SimplexTree::new();
        st.insert(&[0], 0.5);
        st.insert(&[0, 1], 0.2);

        assert_eq!(st.filtration(&[0]), Some(Filtration::Value(0.2)));
        assert!(!st.insert(&[1, 0], 0.9));
        assert_eq!(st.filtration(&[0, 1]), Some(Filtration::Value(0.2)));
    }

    #[test]
    fn test_assign_filtration_touches_one_simplex() {
        let mut st = SimplexTree::new();
        st.insert(&[0, 1], 1.0);
        st.assign_filtration(&[1], Filtration::AlwaysPresent).unwrap();

        assert_eq!(st.filtration(&[1]), Some(Filtration::AlwaysPresent));
        assert_eq!(st.filtration(&[0, 1]), Some(Filtration::Value(1.0)));
        assert!(st.assign_filtration(&[3], 0.0).is_err());
    }

    #[test]
    fn test_expansion_fills_cliques() {
        // Square with one diagonal: two triangles
        let mut st = SimplexTree::new();
        for v in 0..4 {
            st.insert(&[v], 0.0);
        }
        st.insert(&[0, 1], 1.0);
        st.insert(&[1, 2], 1.0);
        st.insert(&[2, 3], 1.0);
        st.insert(&[0, 3], 1.0);
        st.insert(&[0, 2], 1.5);

        st.expansion(3);

        assert_eq!(st.dimension(), Some(2));
        assert_eq!(st.filtration(&[0, 1, 2]), Some(Filtration::Value(1.5)));
        assert_eq!(st.filtration(&[0, 2, 3]), Some(Filtration::Value(1.5)));
        assert!(!st.contains(&[1, 3]));
    }

    #[test]
    fn test_expansion_respects_max_dimension() {
        let mut st = SimplexTree::new();
        for i in 0..4 {
            for j in i + 1..4 {
                st.insert(&[i, j], 1.0);
            }
        }
        st.expansion(2);
        assert_eq!(st.dimension(), Some(2));
        assert_eq!(st.skeleton(2).len(), 4);

        st.expansion(3);
        assert_eq!(st.dimension(), Some(3));
    }

    #[test]
    fn test_filtration_order_puts_faces_first() {
        let mut st = SimplexTree::new();
        st.insert(&[0, 1], 1.0);
        st.assign_filtration(&[0], 1.0).unwrap();
        st.assign_filtration(&[1], Filtration::AlwaysPresent).unwrap();

        let order: Vec<Vec<usize>> = st.filtration_order().into_iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![vec![1], vec![0], vec![0, 1]]);
    }
}
