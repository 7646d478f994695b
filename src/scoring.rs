//! Term-probability estimators and query-likelihood scoring.
//!
//! The [`TermScorer`] trait is the pluggable estimator of P(term | document).
//! Concrete estimators compose by holding sub-scorers at construction:
//!
//! - [`DirichletTermScorer`] — Dirichlet-smoothed maximum likelihood,
//!   shrinking the document's raw term frequency toward collection-wide
//!   statistics.
//! - [`InterpolatedTermScorer`] — a weighted linear combination of
//!   sub-estimators.
//! - [`ExpansionTermScorer`] — averages a wrapped estimator across weighted
//!   expansion documents (the pseudo-relevance-feedback smoothing step).
//!
//! The [`QueryLikelihoodScorer`] combines per-term probabilities into a
//! query log-likelihood. All scorers are configured once and are safe for
//! concurrent reuse across any number of (term, document) calls.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{Result, XiphosError};
use crate::index::DocumentIndex;
use crate::query::Query;

/// An estimator of P(term | document).
///
/// Implementations must keep the estimate strictly positive for any input a
/// correctly configured pipeline can produce; the query-likelihood scorer
/// takes logs of these values and treats a non-positive estimate as a
/// contract violation.
pub trait TermScorer: Send + Sync + Debug {
    /// Estimate the probability of `term` under `document`'s language model.
    fn score(&self, term: &str, document: &Document) -> Result<f64>;
}

/// Configuration for [`DirichletTermScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirichletConfig {
    /// Prior strength: how far estimates are shrunk toward the collection
    /// model.
    pub mu: f64,

    /// Additive floor on collection counts. Must be positive so the
    /// smoothed probability stays strictly positive even for terms the
    /// collection has never seen.
    pub epsilon: f64,
}

impl Default for DirichletConfig {
    fn default() -> Self {
        DirichletConfig {
            mu: 2500.0,
            epsilon: 1.0,
        }
    }
}

/// Dirichlet-smoothed term-probability estimator.
///
/// For term t and document d:
///
/// ```text
/// p_c(t) = (epsilon + collection_count(t)) / collection_total_terms
/// score  = (term_freq(t, d) + mu * p_c(t)) / (doc_length(d) + mu)
/// ```
#[derive(Debug, Clone)]
pub struct DirichletTermScorer {
    index: Arc<dyn DocumentIndex>,
    config: DirichletConfig,
}

impl DirichletTermScorer {
    /// Create a scorer with the default configuration (mu = 2500,
    /// epsilon = 1).
    pub fn new(index: Arc<dyn DocumentIndex>) -> Self {
        DirichletTermScorer::with_config(index, DirichletConfig::default())
    }

    /// Create a scorer with an explicit configuration.
    pub fn with_config(index: Arc<dyn DocumentIndex>, config: DirichletConfig) -> Self {
        DirichletTermScorer { index, config }
    }

    /// The scorer's configuration.
    pub fn config(&self) -> DirichletConfig {
        self.config
    }
}

impl TermScorer for DirichletTermScorer {
    fn score(&self, term: &str, document: &Document) -> Result<f64> {
        let term = term.to_lowercase();

        let doc_vector = document.document_vector()?;
        let term_freq = doc_vector.weight(&term);
        let doc_length = doc_vector.total_weight();

        let total_terms = self.index.collection_total_terms()?;
        if total_terms == 0 {
            return Err(XiphosError::degenerate_input(
                "collection has no terms; cannot estimate collection probability",
            ));
        }
        let collection_prob =
            (self.config.epsilon + self.index.collection_count(&term)? as f64) / total_terms as f64;

        let denominator = doc_length + self.config.mu;
        if denominator == 0.0 {
            return Err(XiphosError::degenerate_input(format!(
                "empty document '{}' with mu = 0",
                document.docno()
            )));
        }
        Ok((term_freq + self.config.mu * collection_prob) / denominator)
    }
}

/// Weighted linear interpolation of term-probability estimators.
///
/// Weights are applied as given, not normalized: the caller chooses weights
/// that sum as intended.
#[derive(Debug, Default)]
pub struct InterpolatedTermScorer {
    components: Vec<(Box<dyn TermScorer>, f64)>,
}

impl InterpolatedTermScorer {
    /// Create an interpolation over `(scorer, weight)` components.
    pub fn new(components: Vec<(Box<dyn TermScorer>, f64)>) -> Self {
        InterpolatedTermScorer { components }
    }

    /// Add a component to the interpolation.
    pub fn push(&mut self, scorer: Box<dyn TermScorer>, weight: f64) {
        self.components.push((scorer, weight));
    }
}

impl TermScorer for InterpolatedTermScorer {
    fn score(&self, term: &str, document: &Document) -> Result<f64> {
        let mut total = 0.0;
        for (scorer, weight) in &self.components {
            total += weight * scorer.score(term, document)?;
        }
        Ok(total)
    }
}

/// Aggregates a base estimator across weighted expansion documents.
///
/// The estimate for a term is the weighted average of the base estimate over
/// the `(document, weight)` pairs returned by
/// [`Document::expansion_docs`](crate::document::Document::expansion_docs),
/// whose weights sum to 1.
#[derive(Debug)]
pub struct ExpansionTermScorer {
    base: Box<dyn TermScorer>,
}

impl ExpansionTermScorer {
    /// Wrap a base estimator.
    pub fn new(base: Box<dyn TermScorer>) -> Self {
        ExpansionTermScorer { base }
    }

    /// Estimate the probability of `term` under the weighted set of
    /// expansion documents. An empty set yields 0, which the
    /// query-likelihood scorer will reject; callers should guard expansion
    /// retrieval's empty-result case upstream.
    pub fn score(&self, term: &str, expansion_docs: &[(Document, f64)]) -> Result<f64> {
        let mut total = 0.0;
        for (document, weight) in expansion_docs {
            total += weight * self.base.score(term, document)?;
        }
        Ok(total)
    }
}

/// A scorer that reduces a whole query against one document to a single
/// relevance value.
pub trait QueryScorer: Send + Sync + Debug {
    /// Score `document` for `query`.
    fn score(&self, query: &Query, document: &Document) -> Result<f64>;
}

/// Query-likelihood scorer.
///
/// Accumulates sum over query terms t of (w(t) / |q|) * ln P(t | d), where
/// P is supplied by the configured [`TermScorer`]. A non-positive P is a
/// [`XiphosError::NumericDomain`] error: the estimator upstream is broken or
/// misconfigured, and the scoring call aborts with full context rather than
/// papering over it.
#[derive(Debug)]
pub struct QueryLikelihoodScorer {
    term_scorer: Box<dyn TermScorer>,
}

impl QueryLikelihoodScorer {
    /// Create a scorer over the given term-probability estimator.
    pub fn new(term_scorer: Box<dyn TermScorer>) -> Self {
        QueryLikelihoodScorer { term_scorer }
    }

    /// Score `document` for `query`. An empty query scores 0.
    pub fn score(&self, query: &Query, document: &Document) -> Result<f64> {
        self.accumulate(query, |term| {
            let probability = self.term_scorer.score(term, document)?;
            checked_ln(probability, term, document.docno())
        })
    }

    /// Score a weighted expansion-document set for `query`: each term's
    /// probability is the base estimate averaged across the expansion
    /// documents, exactly as [`ExpansionTermScorer`] computes it.
    pub fn score_expanded(
        &self,
        query: &Query,
        expansion_docs: &[(Document, f64)],
    ) -> Result<f64> {
        if expansion_docs.is_empty() {
            return Err(XiphosError::degenerate_input(format!(
                "empty expansion-document set for query '{}'",
                query.title()
            )));
        }
        self.accumulate(query, |term| {
            let mut probability = 0.0;
            for (document, weight) in expansion_docs {
                probability += weight * self.term_scorer.score(term, document)?;
            }
            let context = format!("expansion set of {} documents", expansion_docs.len());
            checked_ln(probability, term, &context)
        })
    }

    fn accumulate<F>(&self, query: &Query, mut term_log_prob: F) -> Result<f64>
    where
        F: FnMut(&str) -> Result<f64>,
    {
        let length = query.length();
        let mut score = 0.0;
        for (term, weight) in query.vector().iter() {
            // length > 0 whenever the vector is non-empty with count
            // weights; a zero-length non-empty query is degenerate.
            if length == 0.0 {
                return Err(XiphosError::degenerate_input(format!(
                    "query '{}' has zero length",
                    query.title()
                )));
            }
            score += (weight / length) * term_log_prob(term)?;
        }
        Ok(score)
    }
}

impl QueryScorer for QueryLikelihoodScorer {
    fn score(&self, query: &Query, document: &Document) -> Result<f64> {
        QueryLikelihoodScorer::score(self, query, document)
    }
}

fn checked_ln(probability: f64, term: &str, context: &str) -> Result<f64> {
    if probability <= 0.0 {
        return Err(XiphosError::numeric_domain(format!(
            "term scorer returned non-positive probability {probability} for term \
             '{term}' against {context}"
        )));
    }
    Ok(probability.ln())
}
