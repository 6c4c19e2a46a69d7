//! Persistent Homology via the Standard Algorithm
//!
//! Reduces the Z/2 boundary matrix of a `SimplexTree` in filtration order
//! and reads persistence pairs off the reduced columns.
//!
//! ## Algorithm Overview
//!
//! 1. Order simplices by (filtration value, dimension, vertices)
//! 2. Build sparse boundary columns
//! 3. Reduce each column against earlier pivots
//! 4. A non-zero column kills the class created by its lowest row; a zero
//!    column that is never a pivot creates an essential class
//!
//! ## Extended Persistence
//!
//! The extended filtration of a vertex function f runs up through the
//! sublevel sets of f and then back down through the superlevel sets,
//! relative to what was already built. It is realized as ordinary
//! persistence of the cone ω * K: first ω, then K in ascending lower-star
//! order, then every coned simplex ω * σ in descending order of the
//! minimum vertex value of σ. Pairs are classified by the pass their two
//! simplices belong to.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.
//!
//! Cohen-Steiner, Edelsbrunner, Harer (2009). "Extending Persistence Using
//! Poincaré and Lefschetz Duality". Foundations of Computational Mathematics.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use super::simplex_tree::{compare_values, Filtration, SimplexTree};
use crate::error::{LocalHomologyError, Result};

/// One point of a persistence diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistencePair {
    pub dimension: usize,
    pub birth: f64,
    pub death: f64,
}

impl PersistencePair {
    pub fn new(dimension: usize, birth: f64, death: f64) -> Self {
        Self { dimension, birth, death }
    }

    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        if self.death.is_infinite() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }

    /// Does the feature never die?
    pub fn is_essential(&self) -> bool {
        self.death == f64::INFINITY
    }
}

/// Persistence diagram: an ordered list of (dimension, birth, death) triples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistenceDiagram {
    pub pairs: Vec<PersistencePair>,
}

impl PersistenceDiagram {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn from_pairs(pairs: Vec<PersistencePair>) -> Self {
        Self { pairs }
    }

    pub fn push(&mut self, pair: PersistencePair) {
        self.pairs.push(pair);
    }

    /// Pairs in dimension d
    pub fn dim(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs.iter().filter(|p| p.dimension == d).collect()
    }

    /// Finite pairs in dimension d
    pub fn finite_pairs(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d && !p.is_essential())
            .collect()
    }

    /// Number of pairs in dimension d
    pub fn count(&self, d: usize) -> usize {
        self.pairs.iter().filter(|p| p.dimension == d).count()
    }

    /// Largest dimension present
    pub fn max_dimension(&self) -> Option<usize> {
        self.pairs.iter().map(|p| p.dimension).max()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersistencePair> {
        self.pairs.iter()
    }

    /// Plain `(dimension, (birth, death))` tuples
    pub fn to_tuples(&self) -> Vec<(usize, (f64, f64))> {
        self.pairs
            .iter()
            .map(|p| (p.dimension, (p.birth, p.death)))
            .collect()
    }

    /// Sort by dimension, then birth, then death
    fn sort(&mut self) {
        self.pairs.sort_by(|a, b| {
            a.dimension
                .cmp(&b.dimension)
                .then(a.birth.total_cmp(&b.birth))
                .then(a.death.total_cmp(&b.death))
        });
    }
}

impl FromIterator<PersistencePair> for PersistenceDiagram {
    fn from_iter<I: IntoIterator<Item = PersistencePair>>(iter: I) -> Self {
        Self { pairs: iter.into_iter().collect() }
    }
}

impl IntoIterator for PersistenceDiagram {
    type Item = PersistencePair;
    type IntoIter = std::vec::IntoIter<PersistencePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// The four pieces of an extended persistence diagram
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedDiagrams {
    /// Born and killed on the ascending pass
    pub ordinary: PersistenceDiagram,
    /// Born and killed on the descending pass
    pub relative: PersistenceDiagram,
    /// Born ascending, killed descending, birth < death
    pub extended_plus: PersistenceDiagram,
    /// Born ascending, killed descending, birth >= death
    pub extended_minus: PersistenceDiagram,
}

/// Sparse column representation for boundary matrix
#[derive(Debug, Clone)]
struct SparseColumn {
    /// Non-zero row indices
    rows: BTreeSet<usize>,
}

impl SparseColumn {
    fn new() -> Self {
        Self { rows: BTreeSet::new() }
    }

    fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the lowest (maximum) non-zero index
    fn low(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    /// Toggle a row - addition in Z/2Z
    fn toggle(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    /// Symmetric difference with another column
    fn add_assign(&mut self, other: &SparseColumn) {
        for &row in &other.rows {
            self.toggle(row);
        }
    }
}

/// Result of reducing a filtered boundary matrix
struct Reduction {
    /// (birth index, death index)
    pairs: Vec<(usize, usize)>,
    /// Indices of simplices creating classes that never die
    essential: Vec<usize>,
}

/// Reduce the boundary matrix of `simplices`, given in filtration order.
///
/// Every face of a simplex must appear before it.
fn reduce(simplices: &[Vec<usize>]) -> Reduction {
    let index: HashMap<&[usize], usize> = simplices
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_slice(), i))
        .collect();

    let m = simplices.len();
    let mut columns: Vec<SparseColumn> = Vec::with_capacity(m);
    let mut low_to_col: HashMap<usize, usize> = HashMap::new();

    for (col_idx, simplex) in simplices.iter().enumerate() {
        let mut boundary = SparseColumn::new();

        if simplex.len() > 1 {
            // Boundary of [v0, ..., vk] = sum of [v0, ..., v̂i, ..., vk]
            for i in 0..simplex.len() {
                let mut face = simplex.clone();
                face.remove(i);
                if let Some(&face_idx) = index.get(face.as_slice()) {
                    boundary.toggle(face_idx);
                }
            }
        }

        while let Some(low_idx) = boundary.low() {
            if let Some(&pivot_col) = low_to_col.get(&low_idx) {
                boundary.add_assign(&columns[pivot_col]);
            } else {
                break;
            }
        }

        if let Some(low_idx) = boundary.low() {
            low_to_col.insert(low_idx, col_idx);
        }

        columns.push(boundary);
    }

    let mut paired = vec![false; m];
    let mut pairs = Vec::new();
    for (col_idx, column) in columns.iter().enumerate() {
        if let Some(low_idx) = column.low() {
            paired[low_idx] = true;
            paired[col_idx] = true;
            pairs.push((low_idx, col_idx));
        }
    }

    let essential = (0..m)
        .filter(|&idx| !paired[idx] && columns[idx].is_zero())
        .collect();

    Reduction { pairs, essential }
}

impl SimplexTree {
    /// Persistence diagram with the default settings: zero-length pairs
    /// dropped, top-dimensional homology not reported.
    pub fn persistence(&self) -> PersistenceDiagram {
        self.persistence_with(0.0, false)
    }

    /// Persistence diagram keeping pairs with `death - birth > min_persistence`.
    ///
    /// Unless `persistence_dim_max` is set, classes in the top dimension of
    /// the complex are not reported (dimension 0 always is). Births at
    /// `AlwaysPresent` are reported as `-inf`, essential deaths as `+inf`.
    pub fn persistence_with(
        &self,
        min_persistence: f64,
        persistence_dim_max: bool,
    ) -> PersistenceDiagram {
        let ordered = self.filtration_order();
        let Some(top) = self.dimension() else {
            return PersistenceDiagram::new();
        };
        let reported_below = if persistence_dim_max { top + 1 } else { top.max(1) };

        let simplices: Vec<Vec<usize>> = ordered.iter().map(|(s, _)| s.clone()).collect();
        let reduction = reduce(&simplices);

        let mut diagram = PersistenceDiagram::new();
        for &(birth_idx, death_idx) in &reduction.pairs {
            let (birth_simplex, birth) = &ordered[birth_idx];
            let death = ordered[death_idx].1;
            let dimension = birth_simplex.len() - 1;
            if dimension >= reported_below {
                continue;
            }
            if death.value() - birth.value() > min_persistence {
                diagram.push(PersistencePair::new(dimension, birth.value(), death.value()));
            }
        }

        for &idx in &reduction.essential {
            let (simplex, birth) = &ordered[idx];
            let dimension = simplex.len() - 1;
            if dimension < reported_below {
                diagram.push(PersistencePair::new(dimension, birth.value(), f64::INFINITY));
            }
        }

        diagram.sort();
        debug!(
            simplices = simplices.len(),
            pairs = diagram.len(),
            "computed persistence"
        );
        diagram
    }

    /// Extended persistence of the lower-star filtration given by the
    /// vertex values.
    ///
    /// Simplex values are recomputed from the vertices (max for the
    /// ascending pass, min for the descending pass), so only the vertex
    /// values matter. A relative pair is reported in the dimension of the
    /// coned simplex that created it, which is its relative homology degree.
    pub fn extended_persistence(&self) -> Result<ExtendedDiagrams> {
        if self.is_empty() {
            return Ok(ExtendedDiagrams::default());
        }

        let mut vertex_value: HashMap<usize, f64> = HashMap::new();
        for (simplex, filtration) in self.skeleton(0) {
            match filtration {
                Filtration::Value(v) if v.is_finite() => {
                    vertex_value.insert(simplex[0], v);
                }
                _ => return Err(LocalHomologyError::NonFiniteFiltration { simplex }),
            }
        }

        let apex = vertex_value.keys().max().map_or(0, |&v| v + 1);
        let entries = extended_filtration(self, &vertex_value, apex);
        let simplices: Vec<Vec<usize>> = entries.iter().map(|e| e.vertices.clone()).collect();
        let reduction = reduce(&simplices);

        let mut diagrams = ExtendedDiagrams::default();
        for &(birth_idx, death_idx) in &reduction.pairs {
            let birth = &entries[birth_idx];
            let death = &entries[death_idx];
            let dimension = birth.vertices.len() - 1;

            match (birth.pass, death.pass) {
                (Pass::Ascending, Pass::Ascending) => {
                    if death.value > birth.value {
                        diagrams
                            .ordinary
                            .push(PersistencePair::new(dimension, birth.value, death.value));
                    }
                }
                (Pass::Descending, Pass::Descending) => {
                    if death.value != birth.value {
                        diagrams
                            .relative
                            .push(PersistencePair::new(dimension, birth.value, death.value));
                    }
                }
                (Pass::Ascending, Pass::Descending) => {
                    let pair = PersistencePair::new(dimension, birth.value, death.value);
                    if birth.value < death.value {
                        diagrams.extended_plus.push(pair);
                    } else {
                        diagrams.extended_minus.push(pair);
                    }
                }
                _ => {}
            }
        }

        for &idx in &reduction.essential {
            if entries[idx].pass != Pass::Apex {
                warn!(simplex = ?entries[idx].vertices, "essential class in extended filtration");
            }
        }

        diagrams.ordinary.sort();
        diagrams.relative.sort();
        diagrams.extended_plus.sort();
        diagrams.extended_minus.sort();
        debug!(
            simplices = entries.len(),
            ordinary = diagrams.ordinary.len(),
            relative = diagrams.relative.len(),
            extended_plus = diagrams.extended_plus.len(),
            extended_minus = diagrams.extended_minus.len(),
            "computed extended persistence"
        );
        Ok(diagrams)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Pass {
    Apex,
    Ascending,
    Descending,
}

/// A simplex of the coned complex together with its decoded value
#[derive(Debug, Clone)]
struct ExtendedEntry {
    vertices: Vec<usize>,
    pass: Pass,
    value: f64,
}

/// Simplices of ω * K in extended-filtration order
fn extended_filtration(
    tree: &SimplexTree,
    vertex_value: &HashMap<usize, f64>,
    apex: usize,
) -> Vec<ExtendedEntry> {
    let mut entries = vec![ExtendedEntry {
        vertices: vec![apex],
        pass: Pass::Apex,
        value: f64::NEG_INFINITY,
    }];

    for (simplex, _) in tree.iter() {
        let values = simplex.iter().map(|v| vertex_value[v]);
        let up = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let down = values.fold(f64::INFINITY, f64::min);

        entries.push(ExtendedEntry {
            vertices: simplex.to_vec(),
            pass: Pass::Ascending,
            value: up,
        });

        let mut coned = simplex.to_vec();
        coned.push(apex);
        entries.push(ExtendedEntry {
            vertices: coned,
            pass: Pass::Descending,
            value: down,
        });
    }

    entries.sort_by(|a, b| {
        a.pass
            .cmp(&b.pass)
            .then_with(|| match a.pass {
                Pass::Descending => compare_values(b.value, a.value),
                _ => compare_values(a.value, b.value),
            })
            .then(a.vertices.len().cmp(&b.vertices.len()))
            .then(a.vertices.cmp(&b.vertices))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rips_square() -> SimplexTree {
        // Points at (0,0), (1,0), (1,1), (0,1)
        let s2 = 2.0_f64.sqrt();
        let mut st = SimplexTree::new();
        for v in 0..4 {
            st.insert(&[v], 0.0);
        }
        st.insert(&[0, 1], 1.0);
        st.insert(&[1, 2], 1.0);
        st.insert(&[2, 3], 1.0);
        st.insert(&[0, 3], 1.0);
        st.insert(&[0, 2], s2);
        st.insert(&[1, 3], s2);
        st.expansion(2);
        st
    }

    #[test]
    fn test_two_points() {
        let mut st = SimplexTree::new();
        st.insert(&[0], 0.0);
        st.insert(&[1], 0.0);
        st.insert(&[0, 1], 1.0);

        let pd = st.persistence();

        let finite = pd.finite_pairs(0);
        assert_eq!(finite.len(), 1);
        assert_relative_eq!(finite[0].birth, 0.0);
        assert_relative_eq!(finite[0].death, 1.0);
        assert_eq!(pd.dim(0).iter().filter(|p| p.is_essential()).count(), 1);
    }

    #[test]
    fn test_square_cycle() {
        let pd = rips_square().persistence();

        let h1 = pd.finite_pairs(1);
        assert_eq!(h1.len(), 1, "Square should have one H1 cycle");
        assert_relative_eq!(h1[0].birth, 1.0, epsilon = 1e-10);
        assert_relative_eq!(h1[0].death, 2.0_f64.sqrt(), epsilon = 1e-10);
        assert_eq!(pd.count(0), 4);
    }

    #[test]
    fn test_top_dimension_not_reported_by_default() {
        // A hollow triangle: dimension 1, its loop is top-dimensional
        let mut st = SimplexTree::new();
        st.insert(&[0, 1], 1.0);
        st.insert(&[1, 2], 1.0);
        st.insert(&[0, 2], 1.0);

        assert_eq!(st.persistence().count(1), 0);
        let full = st.persistence_with(0.0, true);
        assert_eq!(full.count(1), 1);
        assert!(full.dim(1)[0].is_essential());
    }

    #[test]
    fn test_always_present_birth_reported_as_negative_infinity() {
        let mut st = SimplexTree::new();
        st.insert(&[0, 1], 1.0);
        st.assign_filtration(&[0], 0.0).unwrap();
        st.assign_filtration(&[1], Filtration::AlwaysPresent).unwrap();

        let pd = st.persistence();
        let essential: Vec<_> = pd.iter().filter(|p| p.is_essential()).collect();
        assert_eq!(essential.len(), 1);
        assert_eq!(essential[0].birth, f64::NEG_INFINITY);
        assert_eq!(pd.finite_pairs(0).len(), 1);
    }

    #[test]
    fn test_extended_persistence_of_path() {
        // Path 0 - 1 - 2 with values 1, 0, 2: one sublevel component, two superlevel ones
        let mut st = SimplexTree::new();
        st.insert(&[0], 1.0);
        st.insert(&[1], 0.0);
        st.insert(&[2], 2.0);
        st.insert(&[0, 1], 1.0);
        st.insert(&[1, 2], 2.0);

        let ext = st.extended_persistence().unwrap();

        assert!(ext.ordinary.is_empty());
        // Superlevel component of vertex 0 is born at 1 and merges at 0
        assert_eq!(ext.relative.len(), 1);
        let relative = ext.relative.pairs[0];
        assert_eq!(relative.dimension, 1);
        assert_relative_eq!(relative.birth, 1.0);
        assert_relative_eq!(relative.death, 0.0);
        // The global component spans min to max
        assert_eq!(ext.extended_plus.len(), 1);
        assert_relative_eq!(ext.extended_plus.pairs[0].birth, 0.0);
        assert_relative_eq!(ext.extended_plus.pairs[0].death, 2.0);
    }

    #[test]
    fn test_extended_persistence_two_minima() {
        // Path with values 0, 2, 1: the minimum at vertex 2 merges at value 2
        let mut st = SimplexTree::new();
        st.insert(&[0], 0.0);
        st.insert(&[1], 2.0);
        st.insert(&[2], 1.0);
        st.insert(&[0, 1], 2.0);
        st.insert(&[1, 2], 2.0);

        let ext = st.extended_persistence().unwrap();

        assert_eq!(ext.ordinary.len(), 1);
        let pair = ext.ordinary.pairs[0];
        assert_eq!(pair.dimension, 0);
        assert_relative_eq!(pair.birth, 1.0);
        assert_relative_eq!(pair.death, 2.0);
    }

    #[test]
    fn test_extended_persistence_rejects_always_present() {
        let mut st = SimplexTree::new();
        st.insert(&[0], Filtration::AlwaysPresent);
        assert!(matches!(
            st.extended_persistence(),
            Err(LocalHomologyError::NonFiniteFiltration { .. })
        ));
    }

    #[test]
    fn test_empty_complex() {
        let st = SimplexTree::new();
        assert!(st.persistence().is_empty());
        assert_eq!(st.extended_persistence().unwrap(), ExtendedDiagrams::default());
    }
}
