//! Offline comparison measures over term-weight vectors.
//!
//! These utilities compare two [`TermVector`]s over the union of their
//! vocabularies, treating absent terms as weight 0. They are used for
//! evaluation and analysis, not for ranking itself.

use crate::error::{Result, XiphosError};
use crate::vector::TermVector;

/// Cosine similarity between two term vectors.
///
/// The numerator is the usual dot product over the union vocabulary. The
/// denominator is the product of the vectors' sums of absolute weights, not
/// the product of their Euclidean norms. This matches the historical
/// behavior of the measure as used in past experiments; callers wanting
/// textbook cosine similarity should not use this function.
///
/// Returns [`XiphosError::DegenerateInput`] when either absolute-weight sum
/// is 0.
///
/// # Examples
///
/// ```
/// use xiphos::similarity::cosine_similarity;
/// use xiphos::vector::TermVector;
///
/// let mut v = TermVector::new();
/// v.add("a", 1.0);
/// v.add("b", 2.0);
///
/// // (1*1 + 2*2) / ((1 + 2) * (1 + 2))
/// let sim = cosine_similarity(&v, &v).unwrap();
/// assert!((sim - 5.0 / 9.0).abs() < 1e-12);
/// ```
pub fn cosine_similarity(v1: &TermVector, v2: &TermVector) -> Result<f64> {
    let mut numerator = 0.0;
    let mut norm1 = 0.0;
    let mut norm2 = 0.0;

    for (term, weight) in v1.iter() {
        numerator += weight * v2.weight(term);
        norm1 += weight.abs();
    }
    for (_, weight) in v2.iter() {
        norm2 += weight.abs();
    }

    if norm1 == 0.0 || norm2 == 0.0 {
        return Err(XiphosError::degenerate_input(
            "cosine similarity of a zero-weight vector",
        ));
    }
    Ok(numerator / (norm1 * norm2))
}

/// Kullback-Leibler divergence between two term-probability vectors, in
/// bits: sum of p(t) * log2(p(t) / q(t)) over the union vocabulary.
///
/// Convention at zero probabilities: a term with p(t) = 0 contributes 0
/// (the 0 * log 0 limit), while q(t) = 0 for a term with p(t) > 0 is
/// reported as [`XiphosError::DegenerateInput`] since the divergence is
/// undefined there.
pub fn kl_divergence(p: &TermVector, q: &TermVector) -> Result<f64> {
    let mut divergence = 0.0;

    for (term, p_weight) in p.iter() {
        if p_weight == 0.0 {
            continue;
        }
        let q_weight = q.weight(term);
        if q_weight == 0.0 {
            return Err(XiphosError::degenerate_input(format!(
                "KL divergence undefined: term '{term}' has probability {p_weight} \
                 under p but 0 under q"
            )));
        }
        divergence += p_weight * (p_weight / q_weight).log2();
    }
    // Terms present only in q have p(t) = 0 and contribute nothing.

    Ok(divergence)
}
