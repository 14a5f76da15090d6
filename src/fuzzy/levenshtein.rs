// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance over Unicode scalar values.
//!
//! The BK-tree needs the *exact* distance at every node it visits, not just a
//! yes/no against a threshold: the child edges to follow are chosen by how far
//! their labels sit from that distance. So unlike a bounded matcher there is no
//! early exit here, only the two-row Wagner-Fischer DP.
//!
//! Characters, not bytes: "č" vs "c" is one substitution, even though the UTF-8
//! encodings differ in length.

/// Levenshtein distance: minimum unit-cost insertions, deletions, and
/// substitutions turning `a` into `b`.
///
/// This is a metric (non-negative, symmetric, zero iff equal, triangle
/// inequality), which is what makes BK-tree pruning sound.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Keep the shorter string in the row to bound memory
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}
