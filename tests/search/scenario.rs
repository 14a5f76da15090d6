//! The two-document cat/dog corpus.

use fuzzdex::{QueryEngine, QueryOptions};

use crate::common::{assert_close, ids, scenario_index};

#[test]
fn test_exact_term_finds_only_its_document() {
    let index = scenario_index();
    let hits = QueryEngine::new(&index).find_relevant_documents("cat", 5);
    assert_eq!(ids(&hits), vec!["a"]);
    assert!(hits[0].score > 0.0);
}

#[test]
fn test_shared_term_scores_equal() {
    let index = scenario_index();
    let hits = QueryEngine::new(&index).find_relevant_documents("sat", 5);
    assert_eq!(ids(&hits), vec!["a", "b"]);
    assert_eq!(hits[0].score, hits[1].score);
}

#[test]
fn test_typo_reaches_document() {
    let index = scenario_index();
    let engine = QueryEngine::new(&index);

    let hits = engine.find_relevant_documents_within("dot", 5, 1);
    assert_eq!(ids(&hits), vec!["b"]);
    assert_close(hits[0].score, 0.5);

    assert!(engine.find_relevant_documents_within("dot", 5, 0).is_empty());
}

#[test]
fn test_explicit_bound_applies_to_short_terms() {
    let index = scenario_index();
    let hits = QueryEngine::new(&index).find_relevant_documents_within("cat", 5, 1);
    // "sat" is one edit from "cat", so b shows up too, below a
    assert_eq!(ids(&hits), vec!["a", "b"]);
    assert_close(hits[0].score, 1.25);
    assert_close(hits[1].score, 0.25);
}

#[test]
fn test_engine_options_carry_the_bound() {
    let index = scenario_index();
    let engine = QueryEngine::with_options(
        &index,
        QueryOptions {
            max_edit_distance: 1,
            exact_match_max_len: 0,
            max_matches_per_term: None,
        },
    );
    assert_eq!(ids(&engine.find_relevant_documents("dot", 5)), vec!["b"]);
    assert_eq!(engine.options().max_edit_distance, 1);
}

#[test]
fn test_stop_word_in_query_is_ignored() {
    let index = scenario_index();
    let engine = QueryEngine::new(&index);
    assert_eq!(
        engine.find_relevant_documents("the cat", 5),
        engine.find_relevant_documents("cat", 5)
    );
}

#[test]
fn test_query_is_normalized_like_documents() {
    let index = scenario_index();
    let engine = QueryEngine::new(&index);
    assert_eq!(
        engine.find_relevant_documents("  CAT!! ", 5),
        engine.find_relevant_documents("cat", 5)
    );
}
