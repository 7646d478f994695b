//! Term vector type used throughout the scoring core.
//!
//! A [`TermVector`] maps terms to non-negative weights (counts, smoothed
//! probabilities, or raw scores depending on context). Lookup of an absent
//! term always yields weight 0 — every consumer relies on that contract, so
//! it is part of the accessor rather than an accident of the container.
//!
//! Iteration follows first-insertion order, which also makes weight ties in
//! [`TermVector::top_terms`] deterministic.
//!
//! # Examples
//!
//! ```
//! use xiphos::vector::TermVector;
//!
//! let mut vector = TermVector::new();
//! vector.add("rust", 2.0);
//! vector.add("search", 1.0);
//! vector.add("rust", 1.0);
//!
//! assert_eq!(vector.weight("rust"), 3.0);
//! assert_eq!(vector.weight("absent"), 0.0);
//! assert_eq!(vector.total_weight(), 4.0);
//! ```

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered mapping from term to weight.
///
/// Built once during construction and treated as immutable afterwards; all
/// transforming operations ([`top_terms`](Self::top_terms), stopword
/// filtering) return new vectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(String, f64)>", into = "Vec<(String, f64)>")]
pub struct TermVector {
    entries: Vec<(String, f64)>,
    positions: AHashMap<String, usize>,
}

impl TermVector {
    /// Create an empty term vector.
    pub fn new() -> Self {
        TermVector::default()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the vector holds no terms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of `term`, or 0.0 if the term is absent. Never fails.
    pub fn weight(&self, term: &str) -> f64 {
        self.positions
            .get(term)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// True if the vector holds an entry for `term`.
    pub fn contains(&self, term: &str) -> bool {
        self.positions.contains_key(term)
    }

    /// Add `delta` to the weight of `term`, inserting the term at the end of
    /// the iteration order if it is new.
    pub fn add(&mut self, term: &str, delta: f64) {
        match self.positions.get(term) {
            Some(&pos) => self.entries[pos].1 += delta,
            None => {
                self.positions.insert(term.to_string(), self.entries.len());
                self.entries.push((term.to_string(), delta));
            }
        }
    }

    /// Set the weight of `term`, inserting the term at the end of the
    /// iteration order if it is new.
    pub fn set(&mut self, term: &str, weight: f64) {
        match self.positions.get(term) {
            Some(&pos) => self.entries[pos].1 = weight,
            None => {
                self.positions.insert(term.to_string(), self.entries.len());
                self.entries.push((term.to_string(), weight));
            }
        }
    }

    /// Iterate over `(term, weight)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(term, weight)| (term.as_str(), *weight))
    }

    /// Iterate over terms in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(term, _)| term.as_str())
    }

    /// Sum of all weights. This is the "length" of a frequency vector.
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }

    /// The `n` highest-weight entries as a new vector, ordered by descending
    /// weight. Ties are broken by first-occurrence order in this vector, so
    /// the selection is deterministic.
    pub fn top_terms(&self, n: usize) -> TermVector {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            self.entries[b]
                .1
                .total_cmp(&self.entries[a].1)
                .then(a.cmp(&b))
        });
        order.truncate(n);

        let mut top = TermVector::new();
        for pos in order {
            let (term, weight) = &self.entries[pos];
            top.set(term, *weight);
        }
        top
    }
}

impl PartialEq for TermVector {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl From<Vec<(String, f64)>> for TermVector {
    fn from(pairs: Vec<(String, f64)>) -> Self {
        let mut vector = TermVector::new();
        for (term, weight) in pairs {
            vector.add(&term, weight);
        }
        vector
    }
}

impl From<TermVector> for Vec<(String, f64)> {
    fn from(vector: TermVector) -> Self {
        vector.entries
    }
}

impl FromIterator<(String, f64)> for TermVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut vector = TermVector::new();
        for (term, weight) in iter {
            vector.add(&term, weight);
        }
        vector
    }
}

impl Extend<(String, f64)> for TermVector {
    fn extend<I: IntoIterator<Item = (String, f64)>>(&mut self, iter: I) {
        for (term, weight) in iter {
            self.add(&term, weight);
        }
    }
}
