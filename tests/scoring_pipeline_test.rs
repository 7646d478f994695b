//! Integration tests for the query-likelihood scoring pipeline.

mod common;

use std::sync::Arc;

use common::MemoryIndex;
use xiphos::prelude::*;

fn corpus() -> Arc<dyn DocumentIndex> {
    Arc::new(MemoryIndex::from_texts(&[
        ("AP-001", "the tower of the elephant stands in the maul"),
        ("AP-002", "an elephant never forgets the jungle"),
        ("AP-003", "towers of midnight rise over the silent city"),
        ("AP-004", "trade caravans cross the desert at midnight"),
    ]))
}

#[test]
fn dirichlet_scores_match_hand_computation() -> Result<()> {
    let index = corpus();
    let config = DirichletConfig {
        mu: 100.0,
        epsilon: 1.0,
    };
    let scorer = DirichletTermScorer::with_config(Arc::clone(&index), config);
    let document = Document::new("AP-001", Arc::clone(&index));

    // "elephant": tf = 1, doc_length = 9, collection_count = 2,
    // total_terms = 30.
    let expected = (1.0 + 100.0 * (1.0 + 2.0) / 30.0) / (9.0 + 100.0);
    let score = scorer.score("elephant", &document)?;
    assert!((score - expected).abs() < 1e-12);

    // Every estimate stays in (0, 1], including unseen terms.
    let unseen = scorer.score("zamboula", &document)?;
    assert!(unseen > 0.0 && unseen <= 1.0);
    Ok(())
}

#[test]
fn query_likelihood_prefers_matching_documents() -> Result<()> {
    let index = corpus();
    let scorer = QueryLikelihoodScorer::new(Box::new(DirichletTermScorer::with_config(
        Arc::clone(&index),
        DirichletConfig {
            mu: 100.0,
            epsilon: 1.0,
        },
    )));
    let query = Query::new("q1", "elephant tower");

    let matching = Document::new("AP-001", Arc::clone(&index));
    let unrelated = Document::new("AP-004", Arc::clone(&index));

    let matching_score = scorer.score(&query, &matching)?;
    let unrelated_score = scorer.score(&query, &unrelated)?;
    assert!(matching_score > unrelated_score);
    Ok(())
}

#[test]
fn interpolated_scorer_blends_two_dirichlet_configurations() -> Result<()> {
    let index = corpus();
    let document = Document::new("AP-002", Arc::clone(&index));

    let light = DirichletTermScorer::with_config(
        Arc::clone(&index),
        DirichletConfig {
            mu: 10.0,
            epsilon: 1.0,
        },
    );
    let heavy = DirichletTermScorer::with_config(
        Arc::clone(&index),
        DirichletConfig {
            mu: 1000.0,
            epsilon: 1.0,
        },
    );

    let p_light = light.score("elephant", &document)?;
    let p_heavy = heavy.score("elephant", &document)?;

    let interpolated = InterpolatedTermScorer::new(vec![
        (Box::new(light) as Box<dyn TermScorer>, 0.3),
        (Box::new(heavy) as Box<dyn TermScorer>, 0.7),
    ]);
    let blended = interpolated.score("elephant", &document)?;

    assert!((blended - (0.3 * p_light + 0.7 * p_heavy)).abs() < 1e-12);
    Ok(())
}

#[test]
fn batch_ranking_skips_unresolved_documents() -> Result<()> {
    let index = corpus();
    let scorer =
        QueryLikelihoodScorer::new(Box::new(DirichletTermScorer::new(Arc::clone(&index))));
    let query = Query::new("q1", "midnight");

    let documents: Vec<Document> = ["AP-003", "AP-404", "AP-001", "AP-004"]
        .iter()
        .map(|docno| Document::new(*docno, Arc::clone(&index)))
        .collect();

    let ranked = rank_documents(&scorer, &query, &documents)?;
    assert_eq!(ranked.hits.len(), 3);
    assert_eq!(ranked.failures.len(), 1);
    assert_eq!(ranked.failures[0].0, "AP-404");

    // Both midnight documents outrank the one without the term.
    let docnos: Vec<&str> = ranked.hits.iter().map(|hit| hit.docno.as_str()).collect();
    assert_eq!(docnos.last(), Some(&"AP-001"));
    Ok(())
}

#[test]
fn scorers_are_shareable_across_threads() -> Result<()> {
    let index = corpus();
    let scorer = Arc::new(QueryLikelihoodScorer::new(Box::new(
        DirichletTermScorer::new(Arc::clone(&index)),
    )));
    let query = Arc::new(Query::new("q1", "elephant"));

    let mut handles = Vec::new();
    for docno in ["AP-001", "AP-002", "AP-003"] {
        let scorer = Arc::clone(&scorer);
        let query = Arc::clone(&query);
        let document = Document::new(docno, Arc::clone(&index));
        handles.push(std::thread::spawn(move || {
            scorer.score(&query, &document)
        }));
    }

    for handle in handles {
        let score = handle.join().expect("scoring thread panicked")?;
        assert!(score.is_finite());
    }
    Ok(())
}
