// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query term expansion: each query term to its fuzzy vocabulary matches.
//!
//! Every term carries its own edit bound, so short terms can stay exact while
//! longer ones in the same query are expanded.
//!
//! Lookups are independent reads of an immutable tree, so with the `parallel`
//! feature they fan out over rayon. `collect()` on an indexed parallel
//! iterator keeps input order, which is what lets the caller fold scores in
//! query-term order no matter how the lookups were scheduled.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fuzzy::{BkTree, TermMatch};

/// Fuzzy matches of one query term, closest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion<'i> {
    pub query_term: String,
    pub max_edit_distance: usize,
    pub matches: Vec<TermMatch<'i>>,
}

fn expand_one(
    tree: &BkTree,
    (term, max_edit_distance): (String, usize),
    max_matches: Option<usize>,
) -> Expansion<'_> {
    let mut matches = tree.query(&term, max_edit_distance);
    if let Some(limit) = max_matches {
        matches.truncate(limit);
    }
    Expansion {
        query_term: term,
        max_edit_distance,
        matches,
    }
}

/// Expand every `(term, bound)` pair, preserving the order of `terms`.
#[cfg(feature = "parallel")]
pub fn expand_terms(
    tree: &BkTree,
    terms: Vec<(String, usize)>,
    max_matches: Option<usize>,
) -> Vec<Expansion<'_>> {
    terms
        .into_par_iter()
        .map(|term| expand_one(tree, term, max_matches))
        .collect()
}

/// Expand every `(term, bound)` pair, preserving the order of `terms`.
#[cfg(not(feature = "parallel"))]
pub fn expand_terms(
    tree: &BkTree,
    terms: Vec<(String, usize)>,
    max_matches: Option<usize>,
) -> Vec<Expansion<'_>> {
    terms
        .into_iter()
        .map(|term| expand_one(tree, term, max_matches))
        .collect()
}
