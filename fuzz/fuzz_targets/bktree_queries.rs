// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BK-tree lookups against a brute-force scan.
//!
//! Pruning by the triangle inequality is only correct if every edge label is
//! exact. Any term the scan finds within the bound and the tree misses is a
//! false negative.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use fuzzdex::{levenshtein, BkTree};

#[derive(Debug, Arbitrary)]
struct Input {
    terms: Vec<String>,
    query: String,
    max_distance: u8,
}

fuzz_target!(|input: Input| {
    let max_distance = usize::from(input.max_distance % 4);
    let terms: Vec<&str> = input
        .terms
        .iter()
        .map(String::as_str)
        .filter(|t| t.chars().count() <= 32)
        .take(64)
        .collect();
    let tree: BkTree = terms.iter().collect();

    let mut expected: Vec<(usize, &str)> = terms
        .iter()
        .map(|t| (levenshtein(&input.query, t), *t))
        .filter(|&(d, _)| d <= max_distance)
        .collect();
    expected.sort_unstable();
    expected.dedup();

    let actual: Vec<(usize, &str)> = tree
        .query(&input.query, max_distance)
        .into_iter()
        .map(|m| (m.distance, m.term))
        .collect();

    assert_eq!(actual, expected);
});
