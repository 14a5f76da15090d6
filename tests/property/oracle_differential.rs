//! Differential tests: fuzzdex against independent reference implementations.

use fuzzdex::{levenshtein, Index, QueryEngine, StopWords};
use proptest::prelude::*;

use crate::common::oracle_search;
use crate::strategies::{corpus, query, unicode_word, word};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_levenshtein_matches_strsim(a in word(), b in word()) {
        prop_assert_eq!(levenshtein(&a, &b), strsim::levenshtein(&a, &b));
    }

    #[test]
    fn prop_levenshtein_counts_chars(a in unicode_word(), b in unicode_word()) {
        prop_assert_eq!(levenshtein(&a, &b), strsim::levenshtein(&a, &b));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_engine_matches_oracle(
        docs in corpus(),
        q in query(),
        top_k in 0usize..10,
        k in 0usize..3,
    ) {
        let index = Index::from_documents(docs, StopWords::from_words(["e"]));
        let actual = QueryEngine::new(&index).find_relevant_documents_within(&q, top_k, k);
        let expected = oracle_search(&index, &q, top_k, k);

        prop_assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(&expected) {
            prop_assert_eq!(&a.doc_id, &e.doc_id);
            prop_assert!((a.score - e.score).abs() < 1e-9, "{} vs {}", a.score, e.score);
        }
    }

    #[test]
    fn prop_results_bounded_and_sorted(docs in corpus(), q in query(), top_k in 0usize..6) {
        let index = Index::from_documents(docs, StopWords::new());
        let hits = QueryEngine::new(&index).find_relevant_documents(&q, top_k);
        prop_assert!(hits.len() <= top_k);
        for pair in hits.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id)
            );
        }
        prop_assert!(hits.iter().all(|h| h.score > 0.0));
    }
}
