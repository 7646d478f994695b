//! Queries over the scoring core's term-vector data model.
//!
//! A [`Query`] is an opaque title plus a term vector built by merging an
//! optional seed vector with counts parsed from a lower-cased,
//! whitespace-tokenized query string. Once built the vector never changes.
//!
//! # Examples
//!
//! ```
//! use xiphos::query::Query;
//!
//! let query = Query::new("401", "Foreign minorities Germany foreign");
//! assert_eq!(query.length(), 4.0);
//! assert_eq!(query.vector().weight("foreign"), 2.0);
//! assert_eq!(
//!     query.to_string(),
//!     "#weight( 2 foreign 1 minorities 1 germany )"
//! );
//! ```

use std::fmt;

use crate::vector::TermVector;

/// A titled, immutable-once-built query vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    title: String,
    vector: TermVector,
}

impl Query {
    /// Build a query from a query string alone. The string is lower-cased
    /// and split on whitespace; each token increments its term weight by 1.
    pub fn new(title: impl Into<String>, query_string: &str) -> Self {
        Query::with_seed(title, query_string, TermVector::new())
    }

    /// Build a query from a seed vector, then merge in the counts parsed
    /// from `query_string`.
    pub fn with_seed(title: impl Into<String>, query_string: &str, seed: TermVector) -> Self {
        let mut vector = seed;
        for token in query_string.to_lowercase().split_whitespace() {
            vector.add(token, 1.0);
        }
        Query {
            title: title.into(),
            vector,
        }
    }

    /// Wrap an already-built vector as a query, without string parsing.
    pub fn from_vector(title: impl Into<String>, vector: TermVector) -> Self {
        Query {
            title: title.into(),
            vector,
        }
    }

    /// The query's opaque identifier.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The query's term vector.
    pub fn vector(&self) -> &TermVector {
        &self.vector
    }

    /// Sum of the vector's weights.
    pub fn length(&self) -> f64 {
        self.vector.total_weight()
    }
}

/// The structured `#weight( w1 t1 w2 t2 ... )` rendering, in vector
/// iteration order. This is the query-language form consumed by the external
/// document index for pseudo-relevance-feedback retrieval.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#weight(")?;
        for (term, weight) in self.vector.iter() {
            write!(f, " {weight} {term}")?;
        }
        write!(f, " )")
    }
}
