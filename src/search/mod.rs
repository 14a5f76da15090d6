// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy ranked retrieval over a built [`Index`].
//!
//! A query goes through four steps:
//!
//! ```text
//!   "Dot  dot cat"
//!       │ normalize (same stop words as the index), dedupe
//!       ▼
//!   [dot, cat]
//!       │ BK-tree lookup per term, within k edits (k=1) (parallel)
//!       ▼
//!   dot → {dog:1, dot:0}   cat → {cat:0, sat:1}
//!       │ walk postings, score += freq / (df * (1 + d))  (query-term order)
//!       ▼
//!   [score per document ordinal]
//!       │ rank: score desc, id asc, top k
//!       ▼
//!   [SearchHit]
//! ```
//!
//! Queries never fail. Blank queries, `top_k == 0`, and queries whose terms are
//! all stop words or all out of reach return an empty list.
//!
//! Under the configured bound, query terms of at most
//! [`DEFAULT_EXACT_MATCH_MAX_LEN`] characters match exactly: at k=2 a
//! three-letter word is within reach of most other three-letter words. An
//! explicit bound passed to [`QueryEngine::find_relevant_documents_within`]
//! applies to every term regardless of length.

mod expand;

pub use expand::{expand_terms, Expansion};

use std::collections::HashSet;

use log::debug;

use crate::index::Index;
use crate::scoring::{rank, term_contribution};
use crate::types::{DocOrdinal, SearchHit};

/// Default bound on edits between a query term and a vocabulary term.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Query terms up to this many characters only match exactly by default.
pub const DEFAULT_EXACT_MATCH_MAX_LEN: usize = 3;

/// Query-time knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub max_edit_distance: usize,
    /// Terms with at most this many characters get no fuzzy matches.
    pub exact_match_max_len: usize,
    /// Keep only the N closest vocabulary matches per query term.
    pub max_matches_per_term: Option<usize>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            exact_match_max_len: DEFAULT_EXACT_MATCH_MAX_LEN,
            max_matches_per_term: None,
        }
    }
}

impl QueryOptions {
    /// Edit bound for one normalized query term.
    pub fn bound_for(&self, term: &str) -> usize {
        if term.chars().count() <= self.exact_match_max_len {
            0
        } else {
            self.max_edit_distance
        }
    }
}

/// Read-only query front end over an index.
///
/// Cheap to construct and `Copy`; any number of engines can share one index
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a Index,
    options: QueryOptions,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self::with_options(index, QueryOptions::default())
    }

    pub fn with_options(index: &'a Index, options: QueryOptions) -> Self {
        Self { index, options }
    }

    pub fn index(&self) -> &'a Index {
        self.index
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Top `top_k` documents for `query` under the configured options.
    pub fn find_relevant_documents(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let options = self.options;
        self.search(query, top_k, |term| options.bound_for(term))
    }

    /// Top `top_k` documents for `query`, allowing `max_edit_distance` edits
    /// for every query term, short ones included.
    pub fn find_relevant_documents_within(
        &self,
        query: &str,
        top_k: usize,
        max_edit_distance: usize,
    ) -> Vec<SearchHit> {
        self.search(query, top_k, |_| max_edit_distance)
    }

    fn search(&self, query: &str, top_k: usize, bound: impl Fn(&str) -> usize) -> Vec<SearchHit> {
        if top_k == 0 {
            return Vec::new();
        }

        let terms: Vec<(String, usize)> = self
            .query_terms(query)
            .into_iter()
            .map(|term| {
                let k = bound(&term);
                (term, k)
            })
            .collect();
        if terms.is_empty() {
            debug!("Query {:?} has no searchable terms", query);
            return Vec::new();
        }

        let expansions = expand_terms(self.index.tree(), terms, self.options.max_matches_per_term);

        let scored = self.accumulate(&expansions);
        debug!(
            "Query {:?}: {} terms, {} candidate documents",
            query,
            expansions.len(),
            scored.len()
        );

        rank(scored, top_k)
            .into_iter()
            .filter_map(|(doc, score)| {
                self.index.doc_id(doc).map(|id| SearchHit {
                    doc_id: id.to_string(),
                    score,
                })
            })
            .collect()
    }

    /// Normalized query terms, first occurrence kept.
    fn query_terms(&self, query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.index
            .normalizer()
            .normalize(query)
            .into_iter()
            .filter(|term| seen.insert(term.clone()))
            .collect()
    }

    /// Sum contributions into a dense per-ordinal table, in query-term then
    /// match order, so floating-point addition happens in the same sequence
    /// on every run. Returns the documents that scored.
    fn accumulate(&self, expansions: &[Expansion<'_>]) -> Vec<(DocOrdinal, f64)> {
        let mut scores = vec![0.0f64; self.index.doc_count()];
        for expansion in expansions {
            for m in &expansion.matches {
                debug!(
                    "  {} ~ {} (distance {}, k={})",
                    expansion.query_term, m.term, m.distance, expansion.max_edit_distance
                );
                let Some(list) = self.index.postings(m.term) else {
                    continue;
                };
                let df = list.document_frequency();
                for posting in &list.postings {
                    if let Some(score) = scores.get_mut(posting.doc.index()) {
                        *score += term_contribution(posting.freq, df, m.distance);
                    }
                }
            }
        }
        scores
            .into_iter()
            .enumerate()
            .filter(|&(_, score)| score > 0.0)
            .map(|(ix, score)| (DocOrdinal(ix as u32), score))
            .collect()
    }
}
