//! A small in-memory document index shared by the integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use xiphos::error::{Result, XiphosError};
use xiphos::index::DocumentIndex;

/// In-memory [`DocumentIndex`] built from raw texts. Doc_ids are assigned
/// from 1 in insertion order and token ids from 1 in first-seen order.
/// Responses to [`DocumentIndex::query`] are canned per test.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    docnos: Vec<String>,
    token_sequences: Vec<Vec<i64>>,
    dictionary: Arc<HashMap<i64, String>>,
    collection_counts: HashMap<String, u64>,
    total_terms: u64,
    query_results: Vec<(i64, f64)>,
}

impl MemoryIndex {
    pub fn from_texts(texts: &[(&str, &str)]) -> Self {
        let mut term_ids: HashMap<String, i64> = HashMap::new();
        let mut dictionary: HashMap<i64, String> = HashMap::new();
        let mut collection_counts: HashMap<String, u64> = HashMap::new();
        let mut docnos = Vec::new();
        let mut token_sequences = Vec::new();
        let mut total_terms = 0u64;

        for (docno, text) in texts {
            let mut token_sequence = Vec::new();
            for token in text.to_lowercase().split_whitespace() {
                let next_id = term_ids.len() as i64 + 1;
                let token_id = *term_ids.entry(token.to_string()).or_insert(next_id);
                dictionary
                    .entry(token_id)
                    .or_insert_with(|| token.to_string());
                *collection_counts.entry(token.to_string()).or_insert(0) += 1;
                total_terms += 1;
                token_sequence.push(token_id);
            }
            docnos.push(docno.to_string());
            token_sequences.push(token_sequence);
        }

        MemoryIndex {
            docnos,
            token_sequences,
            dictionary: Arc::new(dictionary),
            collection_counts,
            total_terms,
            query_results: Vec::new(),
        }
    }

    #[allow(dead_code)]
    pub fn with_query_results(mut self, results: Vec<(i64, f64)>) -> Self {
        self.query_results = results;
        self
    }

    fn position(&self, doc_id: i64) -> Option<usize> {
        usize::try_from(doc_id - 1)
            .ok()
            .filter(|&pos| pos < self.docnos.len())
    }
}

impl DocumentIndex for MemoryIndex {
    fn document_ids(&self, docno: &str) -> Result<i64> {
        self.docnos
            .iter()
            .position(|name| name == docno)
            .map(|pos| pos as i64 + 1)
            .ok_or_else(|| XiphosError::lookup(format!("unknown docno {docno}")))
    }

    fn document(&self, doc_id: i64) -> Result<Vec<i64>> {
        self.position(doc_id)
            .map(|pos| self.token_sequences[pos].clone())
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
        self.position(doc_id)
            .map(|pos| self.docnos[pos].clone())
            .ok_or_else(|| XiphosError::lookup(format!("unknown doc_id {doc_id}")))
    }

    fn query(&self, _query_text: &str, results_requested: usize) -> Result<Vec<(i64, f64)>> {
        let mut results = self.query_results.clone();
        results.truncate(results_requested);
        Ok(results)
    }
}
