//! Parallel batch ranking over a candidate document set.
//!
//! Scoring many (query, document) pairs is embarrassingly parallel: scorers
//! hold no mutable state and the document index only needs to support
//! concurrent reads. This module fans the per-document scoring calls out
//! over a rayon pool and collects a deterministic ranking.
//!
//! Failure isolation follows the scoring core's error taxonomy: lookup and
//! degenerate-input failures are local to one document and are reported
//! per item without aborting the batch, while a numeric domain violation
//! means the estimator itself is broken and aborts the whole run.

use rayon::prelude::*;

use crate::document::Document;
use crate::error::{Result, XiphosError};
use crate::query::Query;
use crate::scoring::QueryScorer;

/// One scored document in a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredHit {
    /// External document identifier.
    pub docno: String,
    /// The query scorer's output for this document.
    pub score: f64,
}

/// The outcome of a batch ranking run.
#[derive(Debug, Default)]
pub struct RankedList {
    /// Successfully scored documents, highest score first.
    pub hits: Vec<ScoredHit>,
    /// Documents skipped because their scoring call failed, with the
    /// per-item error.
    pub failures: Vec<(String, XiphosError)>,
}

/// Score every candidate document for `query` in parallel and rank the
/// results by descending score (ties broken by docno, so the ordering is
/// deterministic).
///
/// Per-document lookup and degenerate-input failures land in
/// [`RankedList::failures`]; a [`XiphosError::NumericDomain`] error aborts
/// the run, since every remaining call would hit the same broken estimator.
pub fn rank_documents(
    scorer: &dyn QueryScorer,
    query: &Query,
    documents: &[Document],
) -> Result<RankedList> {
    let outcomes: Vec<(usize, Result<f64>)> = documents
        .par_iter()
        .enumerate()
        .map(|(pos, document)| (pos, scorer.score(query, document)))
        .collect();

    let mut ranked = RankedList::default();
    for (pos, outcome) in outcomes {
        let docno = documents[pos].docno().to_string();
        match outcome {
            Ok(score) => ranked.hits.push(ScoredHit { docno, score }),
            Err(error @ XiphosError::NumericDomain(_)) => return Err(error),
            Err(error) => ranked.failures.push((docno, error)),
        }
    }

    ranked
        .hits
        .sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.docno.cmp(&b.docno)));
    Ok(ranked)
}
