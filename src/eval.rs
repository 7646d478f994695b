//! Readers for TREC-style evaluation files.
//!
//! [`Qrels`] holds relevance judgments (query to relevant docnos) and
//! [`BatchResults`] holds a batch run's ranked output. Both are loaded once,
//! read-only afterwards, and sit outside the scoring hot path.
//!
//! Whether a malformed line aborts the load or is skipped is an explicit
//! choice through [`LoadPolicy`]; nothing is skipped silently by default.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XiphosError};

/// How file loaders treat malformed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadPolicy {
    /// Abort the load on the first malformed line.
    #[default]
    Strict,
    /// Skip malformed lines and keep loading.
    SkipMalformed,
}

/// Relevance judgments: one whitespace-separated record per line, in the
/// form `query iteration docno relevance`. A docno is relevant to a query
/// iff its recorded relevance is greater than 0.
#[derive(Debug, Default)]
pub struct Qrels {
    judgments: HashMap<String, HashSet<String>>,
}

impl Qrels {
    /// An empty judgment set.
    pub fn new() -> Self {
        Qrels::default()
    }

    /// Load judgments from a file under the given policy.
    pub fn from_file<P: AsRef<Path>>(path: P, policy: LoadPolicy) -> Result<Self> {
        let mut qrels = Qrels::new();
        let file = File::open(path)?;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_qrel_line(&line, line_no + 1) {
                Ok(Some((query, docno))) => {
                    qrels.judgments.entry(query).or_default().insert(docno);
                }
                Ok(None) => {}
                Err(error) => match policy {
                    LoadPolicy::Strict => return Err(error),
                    LoadPolicy::SkipMalformed => continue,
                },
            }
        }
        Ok(qrels)
    }

    /// True if `docno` is judged relevant to the query. A query with no
    /// recorded judgments yields false, not an error.
    pub fn is_relevant(&self, docno: &str, query_title: &str) -> bool {
        self.judgments
            .get(query_title)
            .is_some_and(|docnos| docnos.contains(docno))
    }

    /// The docnos judged relevant to a query. Empty for unknown queries.
    pub fn relevant_docs(&self, query_title: &str) -> impl Iterator<Item = &str> {
        self.judgments
            .get(query_title)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }
}

fn parse_qrel_line(line: &str, line_no: usize) -> Result<Option<(String, String)>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [query, _iteration, docno, relevance] = fields.as_slice() else {
        return Err(XiphosError::malformed_record(format!(
            "qrels line {line_no}: expected 4 fields, found {}",
            fields.len()
        )));
    };
    let relevance: i64 = relevance.parse().map_err(|_| {
        XiphosError::malformed_record(format!(
            "qrels line {line_no}: relevance '{relevance}' is not an integer"
        ))
    })?;

    if relevance > 0 {
        Ok(Some((query.to_string(), docno.to_string())))
    } else {
        Ok(None)
    }
}

/// A batch run's output: one whitespace-separated record per line, in the
/// form `query iteration docno rank score run_id`. Documents are kept in
/// file order per query.
#[derive(Debug, Default)]
pub struct BatchResults {
    scores: HashMap<String, HashMap<String, f64>>,
    docs: HashMap<String, Vec<String>>,
}

impl BatchResults {
    /// An empty result set.
    pub fn new() -> Self {
        BatchResults::default()
    }

    /// Load a batch-results file under the given policy.
    pub fn from_file<P: AsRef<Path>>(path: P, policy: LoadPolicy) -> Result<Self> {
        let mut results = BatchResults::new();
        let file = File::open(path)?;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_result_line(&line, line_no + 1) {
                Ok((query, docno, score)) => {
                    results
                        .scores
                        .entry(query.clone())
                        .or_default()
                        .insert(docno.clone(), score);
                    results.docs.entry(query).or_default().push(docno);
                }
                Err(error) => match policy {
                    LoadPolicy::Strict => return Err(error),
                    LoadPolicy::SkipMalformed => continue,
                },
            }
        }
        Ok(results)
    }

    /// The ranked docnos recorded for a query, in file order. Empty for
    /// unknown queries.
    pub fn query_results(&self, query_title: &str) -> &[String] {
        self.docs
            .get(query_title)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The recorded score of a document for a query, or `None` when either
    /// is unknown.
    pub fn document_query_score(&self, docno: &str, query_title: &str) -> Option<f64> {
        self.scores.get(query_title)?.get(docno).copied()
    }
}

fn parse_result_line(line: &str, line_no: usize) -> Result<(String, String, f64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [query, _iteration, docno, _rank, score, _run_id] = fields.as_slice() else {
        return Err(XiphosError::malformed_record(format!(
            "batch-results line {line_no}: expected 6 fields, found {}",
            fields.len()
        )));
    };
    let score: f64 = score.parse().map_err(|_| {
        XiphosError::malformed_record(format!(
            "batch-results line {line_no}: score '{score}' is not a number"
        ))
    })?;
    Ok((query.to_string(), docno.to_string(), score))
}
