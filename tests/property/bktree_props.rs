//! BK-tree lookups agree with a linear scan of the vocabulary.

use std::collections::BTreeSet;

use fuzzdex::{levenshtein, BkTree};
use proptest::prelude::*;

use crate::strategies::{vocabulary, word};

fn brute_force(terms: &[String], query: &str, k: usize) -> Vec<(usize, String)> {
    let unique: BTreeSet<&String> = terms.iter().collect();
    let mut expected: Vec<(usize, String)> = unique
        .into_iter()
        .map(|t| (levenshtein(query, t), t.clone()))
        .filter(|&(d, _)| d <= k)
        .collect();
    expected.sort();
    expected
}

fn lookup(tree: &BkTree, query: &str, k: usize) -> Vec<(usize, String)> {
    tree.query(query, k)
        .into_iter()
        .map(|m| (m.distance, m.term.to_string()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_query_equals_linear_scan(terms in vocabulary(), query in word(), k in 0usize..4) {
        let tree: BkTree = terms.iter().collect();
        prop_assert_eq!(lookup(&tree, &query, k), brute_force(&terms, &query, k));
    }

    #[test]
    fn prop_zero_distance_is_membership(terms in vocabulary(), query in word()) {
        let tree: BkTree = terms.iter().collect();
        let exact = tree.query(&query, 0);
        prop_assert_eq!(tree.contains(&query), terms.contains(&query));
        prop_assert_eq!(exact.len(), usize::from(terms.contains(&query)));
    }

    #[test]
    fn prop_len_counts_distinct_terms(terms in vocabulary()) {
        let tree: BkTree = terms.iter().collect();
        let distinct: BTreeSet<&str> = terms.iter().map(String::as_str).collect();
        prop_assert_eq!(tree.len(), distinct.len());
        prop_assert_eq!(tree.terms().collect::<BTreeSet<_>>(), distinct);
    }

    #[test]
    fn prop_edge_labels_are_distances(terms in vocabulary()) {
        let tree: BkTree = terms.iter().collect();
        let nodes = tree.nodes();
        for node in nodes {
            for &(label, child) in &node.children {
                let child_term = &nodes[child.index()].term;
                prop_assert_eq!(label as usize, levenshtein(&node.term, child_term));
            }
        }
    }

    #[test]
    fn prop_inserted_tree_survives_validation(terms in vocabulary(), query in word(), k in 0usize..3) {
        let tree: BkTree = terms.iter().collect();
        let rebuilt = BkTree::from_nodes(tree.nodes().to_vec());
        prop_assert!(rebuilt.is_ok(), "{:?}", rebuilt.err());
        if let Ok(rebuilt) = rebuilt {
            prop_assert_eq!(lookup(&rebuilt, &query, k), lookup(&tree, &query, k));
        }
    }

    #[test]
    fn prop_insertion_order_does_not_change_results(
        terms in vocabulary(),
        query in word(),
        k in 0usize..3,
    ) {
        let forward: BkTree = terms.iter().collect();
        let backward: BkTree = terms.iter().rev().collect();
        prop_assert_eq!(lookup(&forward, &query, k), lookup(&backward, &query, k));
    }

    #[test]
    fn prop_larger_bound_finds_superset(terms in vocabulary(), query in word(), k in 0usize..3) {
        let tree: BkTree = terms.iter().collect();
        let narrow: BTreeSet<String> = lookup(&tree, &query, k).into_iter().map(|(_, t)| t).collect();
        let wide: BTreeSet<String> = lookup(&tree, &query, k + 1).into_iter().map(|(_, t)| t).collect();
        prop_assert!(narrow.is_subset(&wide));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_triangle_inequality(a in word(), b in word(), c in word()) {
        prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
    }

    #[test]
    fn prop_distance_is_a_metric(a in word(), b in word()) {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        prop_assert_eq!(levenshtein(&a, &b) == 0, a == b);
        prop_assert!(levenshtein(&a, &b) <= a.chars().count().max(b.chars().count()));
    }
}
