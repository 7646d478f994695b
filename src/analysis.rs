//! Stopword filtering for term vectors.
//!
//! A [`Stopper`] holds an immutable, lower-cased set of stopwords and
//! produces filtered copies of term vectors. There is deliberately no shared
//! default instance: callers construct their own, and [`Stopper::empty`] is
//! the identity transform.
//!
//! # Examples
//!
//! ```
//! use xiphos::analysis::Stopper;
//! use xiphos::vector::TermVector;
//!
//! let stopper = Stopper::from_terms(["the", "of"]);
//!
//! let mut vector = TermVector::new();
//! vector.add("the", 4.0);
//! vector.add("riddle", 2.0);
//! vector.add("of", 3.0);
//! vector.add("steel", 1.0);
//!
//! let filtered = stopper.stop(&vector);
//! assert_eq!(filtered.len(), 2);
//! assert_eq!(filtered.weight("riddle"), 2.0);
//! assert_eq!(filtered.weight("the"), 0.0);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashSet;

use crate::error::Result;
use crate::vector::TermVector;

/// An immutable stopword set.
#[derive(Debug, Clone, Default)]
pub struct Stopper {
    stopwords: AHashSet<String>,
}

impl Stopper {
    /// Create a stopper with no stopwords. Filtering with it is the
    /// identity transform.
    pub fn empty() -> Self {
        Stopper::default()
    }

    /// Create a stopper from an explicit collection of terms. Terms are
    /// lower-cased on the way in.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = terms
            .into_iter()
            .map(|term| term.as_ref().to_lowercase())
            .collect();
        Stopper { stopwords }
    }

    /// Create a stopper from a file holding one term per line. Lines are
    /// trimmed and lower-cased; blank lines are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Stopper::empty().with_file(path)
    }

    /// Add the terms from a stopword file to this stopper, returning the
    /// combined stopper.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let file = File::open(path)?;
        for line in BufReader::new(file).lines() {
            let line = line?;
            let term = line.trim();
            if !term.is_empty() {
                self.stopwords.insert(term.to_lowercase());
            }
        }
        Ok(self)
    }

    /// Number of stopwords in the set.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// True if the set holds no stopwords.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// True if `term` is a stopword.
    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    /// Return a copy of `vector` without stopword entries, preserving the
    /// order of the surviving terms.
    pub fn stop(&self, vector: &TermVector) -> TermVector {
        let mut filtered = TermVector::new();
        for (term, weight) in vector.iter() {
            if !self.stopwords.contains(term) {
                filtered.set(term, weight);
            }
        }
        filtered
    }
}
