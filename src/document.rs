//! Documents backed by an external index, with optional feedback capability.
//!
//! A [`Document`] wraps an external docno plus the internal doc_id resolved
//! through the [`DocumentIndex`] collaborator. Its term vector is recomputed
//! from the index on every call — never cached, never mutated in place.
//!
//! Feedback capability is an attached configuration, not a subclass: a
//! document carrying a feedback index (or falling back to its own index) can
//! summarize itself as a pseudo-query and retrieve weighted expansion
//! documents for pseudo-relevance feedback.

use std::sync::Arc;

use crate::analysis::Stopper;
use crate::error::Result;
use crate::index::DocumentIndex;
use crate::query::Query;
use crate::vector::TermVector;

/// Sentinel doc_id for a docno the index could not resolve.
pub const INVALID_DOC_ID: i64 = -1;

/// A lightweight handle on one indexed document.
///
/// Cheap to create and clone; batch runs recreate documents per lookup
/// rather than holding them.
#[derive(Debug, Clone)]
pub struct Document {
    docno: String,
    doc_id: i64,
    index: Arc<dyn DocumentIndex>,
    feedback: Option<Arc<dyn DocumentIndex>>,
}

impl Document {
    /// Create a document handle, resolving `docno` to an internal doc_id.
    ///
    /// Resolution failure is recoverable: the handle is still returned, with
    /// [`INVALID_DOC_ID`] as its doc_id, and [`Document::is_valid`] reports
    /// false. Later vector lookups on an invalid handle fail with the
    /// index's lookup error.
    pub fn new(docno: impl Into<String>, index: Arc<dyn DocumentIndex>) -> Self {
        let docno = docno.into();
        let doc_id = index.document_ids(&docno).unwrap_or(INVALID_DOC_ID);
        Document {
            docno,
            doc_id,
            index,
            feedback: None,
        }
    }

    /// Attach a feedback index, enabling expansion retrieval against an
    /// index other than the document's own.
    pub fn with_feedback_index(mut self, index: Arc<dyn DocumentIndex>) -> Self {
        self.feedback = Some(index);
        self
    }

    /// The external, human-facing identifier.
    pub fn docno(&self) -> &str {
        &self.docno
    }

    /// The internal identifier, or [`INVALID_DOC_ID`].
    pub fn doc_id(&self) -> i64 {
        self.doc_id
    }

    /// True if the docno was resolved by the index.
    pub fn is_valid(&self) -> bool {
        self.doc_id != INVALID_DOC_ID
    }

    /// The index used for feedback retrieval: the attached feedback index if
    /// present, otherwise the document's own index.
    pub fn feedback_index(&self) -> &Arc<dyn DocumentIndex> {
        self.feedback.as_ref().unwrap_or(&self.index)
    }

    /// Compute the document's term-frequency vector from the index's token
    /// sequence. Non-positive token ids (the index's filler sentinel) and
    /// ids missing from the dictionary are discarded.
    ///
    /// Always a fresh computation; callers that need the vector more than
    /// once within one scoring step should hold on to the returned value.
    pub fn document_vector(&self) -> Result<TermVector> {
        let dictionary = self.index.dictionary()?;
        let token_ids = self.index.document(self.doc_id)?;

        let mut vector = TermVector::new();
        for token_id in token_ids {
            if token_id <= 0 {
                continue;
            }
            if let Some(term) = dictionary.get(&token_id) {
                vector.add(term, 1.0);
            }
        }
        Ok(vector)
    }

    /// Summarize this document as a pseudo-query: the `num_terms`
    /// highest-weight terms of the stopword-filtered document vector (ties
    /// broken by first occurrence), titled by the docno.
    pub fn pseudo_query(&self, num_terms: usize, stopper: &Stopper) -> Result<Query> {
        let vector = stopper.stop(&self.document_vector()?);
        Ok(Query::from_vector(
            self.docno.clone(),
            vector.top_terms(num_terms),
        ))
    }

    /// Retrieve the expansion documents for this document by issuing the
    /// pseudo-query's `#weight(...)` rendering to the feedback index.
    ///
    /// Raw relevance scores are rescaled to sum to 1 over the returned set.
    /// An empty result set, or one whose scores sum to 0, yields an empty
    /// list rather than dividing by zero. Returned documents carry the
    /// feedback index as both their own and their feedback index.
    pub fn expansion_docs(
        &self,
        pseudo_query: &Query,
        num_docs: usize,
    ) -> Result<Vec<(Document, f64)>> {
        let feedback = self.feedback_index();
        let results = feedback.query(&pseudo_query.to_string(), num_docs)?;

        let total_score: f64 = results.iter().map(|(_, score)| score).sum();
        if results.is_empty() || total_score == 0.0 {
            return Ok(Vec::new());
        }

        let mut expansion = Vec::with_capacity(results.len());
        for (doc_id, score) in results {
            let docno = feedback.ext_document_id(doc_id)?;
            let doc = Document::new(docno, Arc::clone(feedback))
                .with_feedback_index(Arc::clone(feedback));
            expansion.push((doc, score / total_score));
        }
        Ok(expansion)
    }

    /// [`Document::expansion_docs`] without the weights.
    pub fn expansion_docs_unweighted(
        &self,
        pseudo_query: &Query,
        num_docs: usize,
    ) -> Result<Vec<Document>> {
        Ok(self
            .expansion_docs(pseudo_query, num_docs)?
            .into_iter()
            .map(|(doc, _)| doc)
            .collect())
    }
}
