//! # Xiphos
//!
//! Language-model retrieval scoring with pseudo-relevance feedback.
//!
//! Xiphos estimates the relevance of a document to a query under the
//! query-likelihood retrieval model and refines those estimates with
//! pseudo-relevance feedback: a document is summarized as a pseudo-query,
//! related documents are retrieved through an external index, and term
//! probabilities are re-estimated as weighted averages over that feedback
//! set.
//!
//! ## Features
//!
//! - Dirichlet-smoothed term-probability estimation
//! - Linear interpolation of pluggable estimators
//! - Query-likelihood document scoring
//! - Pseudo-query construction and expansion-document retrieval
//! - Cosine-similarity and KL-divergence vector analysis
//! - TREC-style relevance-judgment and batch-result readers
//! - Parallel batch ranking with per-document failure isolation
//!
//! Index construction and storage are out of scope: candidates, token
//! sequences, and collection statistics come from an external index through
//! the [`index::DocumentIndex`] trait.

pub mod analysis;
pub mod batch;
pub mod document;
pub mod error;
pub mod eval;
pub mod index;
pub mod query;
pub mod scoring;
pub mod similarity;
pub mod vector;

pub mod prelude {
    //! Convenience re-exports of the types most callers need.

    pub use crate::analysis::Stopper;
    pub use crate::batch::{RankedList, ScoredHit, rank_documents};
    pub use crate::document::{Document, INVALID_DOC_ID};
    pub use crate::error::{Result, XiphosError};
    pub use crate::eval::{BatchResults, LoadPolicy, Qrels};
    pub use crate::index::DocumentIndex;
    pub use crate::query::Query;
    pub use crate::scoring::{
        DirichletConfig, DirichletTermScorer, ExpansionTermScorer, InterpolatedTermScorer,
        QueryLikelihoodScorer, QueryScorer, TermScorer,
    };
    pub use crate::similarity::{cosine_similarity, kl_divergence};
    pub use crate::vector::TermVector;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
