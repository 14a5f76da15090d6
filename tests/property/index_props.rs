//! Structural invariants of a built index.

use std::collections::BTreeSet;

use fuzzdex::{Index, StopWords};
use proptest::prelude::*;

use crate::strategies::corpus;

fn build(docs: &[(String, String)], stop: &StopWords) -> Index {
    Index::from_documents(docs.iter().cloned(), stop.clone())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_vocabulary_is_tree(docs in corpus()) {
        let index = build(&docs, &StopWords::new());
        let vocab: BTreeSet<&str> = index.vocabulary().collect();
        let tree: BTreeSet<&str> = index.tree().terms().collect();
        prop_assert_eq!(vocab, tree);
        prop_assert_eq!(index.term_count(), index.tree().len());
    }

    #[test]
    fn prop_term_indexed_iff_in_some_document(docs in corpus()) {
        let stop = StopWords::from_words(["a", "ab"]);
        let index = build(&docs, &stop);
        let normalizer = index.normalizer();
        let expected: BTreeSet<String> = docs
            .iter()
            .flat_map(|(_, text)| normalizer.normalize(text))
            .collect();
        let actual: BTreeSet<String> = index.vocabulary().map(str::to_string).collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(index.postings("a").is_none());
    }

    #[test]
    fn prop_postings_well_formed(docs in corpus()) {
        let index = build(&docs, &StopWords::new());
        for (term, list) in index.posting_lists() {
            prop_assert!(!list.postings.is_empty(), "{} has no postings", term);
            let mut previous = None;
            for posting in &list.postings {
                prop_assert!(posting.doc.index() < index.doc_count());
                prop_assert!(posting.freq >= 1);
                prop_assert!(previous < Some(posting.doc));
                previous = Some(posting.doc);
            }
            let total: u64 = list.postings.iter().map(|p| u64::from(p.freq)).sum();
            prop_assert_eq!(list.collection_frequency, total);
        }
    }

    #[test]
    fn prop_frequencies_match_token_counts(docs in corpus()) {
        let index = build(&docs, &StopWords::new());
        let normalizer = index.normalizer();
        for (id, text) in &docs {
            let terms = normalizer.normalize(text);
            let ordinal = index.documents().iter().position(|d| d == id).unwrap();
            for term in &terms {
                let expected = terms.iter().filter(|t| *t == term).count() as u32;
                let list = index.postings(term).unwrap();
                let posting = list.postings.iter().find(|p| p.doc.index() == ordinal).unwrap();
                prop_assert_eq!(posting.freq, expected);
            }
        }
    }

    #[test]
    fn prop_document_order_is_irrelevant(docs in corpus(), seed in any::<u64>()) {
        let mut shuffled = docs.clone();
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);
        shuffled.swap(0, len - 1);

        let a = build(&docs, &StopWords::new());
        let b = build(&shuffled, &StopWords::new());
        prop_assert_eq!(a.documents(), b.documents());
        prop_assert_eq!(
            a.posting_lists().collect::<Vec<_>>(),
            b.posting_lists().collect::<Vec<_>>()
        );
        prop_assert_eq!(a.tree(), b.tree());
    }
}
