//! The external document index collaborator.
//!
//! Xiphos does not build, store, or search an inverted index of its own; it
//! consumes one through the [`DocumentIndex`] trait. Implementations wrap
//! whatever retrieval backend is in use and must support safe concurrent
//! reads, since scorers issue lookups from many threads at once.
//!
//! The only query text the scoring core ever sends through
//! [`DocumentIndex::query`] is the `#weight( w1 t1 w2 t2 ... )` rendering of
//! a [`Query`](crate::query::Query), used for the pseudo-relevance-feedback
//! retrieval call. The ranking model behind `query` is the index's own.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;

/// Read-only access to an external document index.
///
/// `doc_id` values are the index's internal integer identifiers; `docno`
/// values are the external, human-facing identifiers. Token ids less than or
/// equal to 0 in a document's token sequence are the index's sentinel for
/// out-of-vocabulary or filtered positions and are discarded by consumers.
pub trait DocumentIndex: Send + Sync + Debug {
    /// Resolve an external docno to an internal doc_id. Fails with a
    /// lookup error when the docno is unknown.
    fn document_ids(&self, docno: &str) -> Result<i64>;

    /// The token-id sequence of a document.
    fn document(&self, doc_id: i64) -> Result<Vec<i64>>;

    /// The token-id to term mapping for the whole collection.
    fn dictionary(&self) -> Result<Arc<HashMap<i64, String>>>;

    /// Number of occurrences of `term` across the collection.
    fn collection_count(&self, term: &str) -> Result<u64>;

    /// Total number of term occurrences across the collection.
    fn collection_total_terms(&self) -> Result<u64>;

    /// Resolve an internal doc_id back to its external docno.
    fn ext_document_id(&self, doc_id: i64) -> Result<String>;

    /// Run `query_text` through the index's own retrieval model, returning
    /// at most `results_requested` ranked `(doc_id, score)` pairs.
    fn query(&self, query_text: &str, results_requested: usize) -> Result<Vec<(i64, f64)>>;
}

#[cfg(test)]
pub(crate) mod stub {
    //! A canned in-memory index used by unit tests across the crate.

    use ahash::AHashMap;

    use crate::error::XiphosError;

    use super::*;

    /// Test double for [`DocumentIndex`]. Documents are stored as token-id
    /// sequences; doc_ids are assigned from 1 in insertion order. Results
    /// for [`DocumentIndex::query`] are canned.
    #[derive(Debug, Default)]
    pub(crate) struct StubIndex {
        docs: Vec<(String, Vec<i64>)>,
        dictionary: Arc<HashMap<i64, String>>,
        collection_counts: AHashMap<String, u64>,
        total_terms: u64,
        query_results: Vec<(i64, f64)>,
    }

    impl StubIndex {
        /// Build a stub over `(docno, text)` pairs, tokenizing on
        /// whitespace. Token id 0 is never assigned.
        pub(crate) fn from_texts(texts: &[(&str, &str)]) -> Self {
            let mut term_ids: AHashMap<String, i64> = AHashMap::new();
            let mut dictionary: HashMap<i64, String> = HashMap::new();
            let mut collection_counts: AHashMap<String, u64> = AHashMap::new();
            let mut docs = Vec::new();
            let mut total_terms = 0u64;

            for (docno, text) in texts {
                let mut token_ids = Vec::new();
                for token in text.to_lowercase().split_whitespace() {
                    let next_id = term_ids.len() as i64 + 1;
                    let token_id = *term_ids.entry(token.to_string()).or_insert(next_id);
                    dictionary.entry(token_id).or_insert_with(|| token.to_string());
                    *collection_counts.entry(token.to_string()).or_insert(0) += 1;
                    total_terms += 1;
                    token_ids.push(token_id);
                }
                docs.push((docno.to_string(), token_ids));
            }

            StubIndex {
                docs,
                dictionary: Arc::new(dictionary),
                collection_counts,
                total_terms,
                query_results: Vec::new(),
            }
        }

        pub(crate) fn with_query_results(mut self, results: Vec<(i64, f64)>) -> Self {
            self.query_results = results;
            self
        }
    }

    impl DocumentIndex for StubIndex {
        fn document_ids(&self, docno: &str) -> Result<i64> {
            self.docs
                .iter()
                .position(|(name, _)| name == docno)
                .map(|pos| pos as i64 + 1)
                .ok_or_else(|| XiphosError::lookup(format!("unknown docno {docno}")))
        }

        fn document(&self, doc_id: i64) -> Result<Vec<i64>> {
            usize::try_from(doc_id - 1)
                .ok()
                .and_then(|pos| self.docs.get(pos))
                .map(|(_, token_ids)| token_ids.clone())
                .ok_or_else(|| XiphosError::lookup(format!("unknown doc_id {doc_id}")))
        }

        fn dictionary(&self) -> Result<Arc<HashMap<i64, String>>> {
            Ok(Arc::clone(&self.dictionary))
        }

        fn collection_count(&self, term: &str) -> Result<u64> {
            Ok(self.collection_counts.get(term).copied().unwrap_or(0))
        }

        fn collection_total_terms(&self) -> Result<u64> {
            Ok(self.total_terms)
        }

        fn ext_document_id(&self, doc_id: i64) -> Result<String> {
            usize::try_from(doc_id - 1)
                .ok()
                .and_then(|pos| self.docs.get(pos))
                .map(|(docno, _)| docno.clone())
                .ok_or_else(|| XiphosError::lookup(format!("unknown doc_id {doc_id}")))
        }

        fn query(&self, _query_text: &str, results_requested: usize) -> Result<Vec<(i64, f64)>> {
            let mut results = self.query_results.clone();
            results.truncate(results_requested);
            Ok(results)
        }
    }
}
