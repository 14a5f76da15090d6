// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The immutable search index.
//!
//! An [`Index`] is built once (by `build`) or loaded once (by `binary`), then
//! only ever read. Nothing here takes `&mut self`, so a single index can be
//! shared by reference across any number of concurrent query engines.
//!
//! # Invariants
//!
//! 1. **DOCS_SORTED**: the document table is sorted and free of duplicates
//! 2. **POSTINGS_NON_EMPTY**: every term has at least one posting
//! 3. **VOCAB_EQ_TREE**: the key set of `postings` equals the BK-tree's terms
//! 4. **ORDINALS_IN_RANGE**: every posting's ordinal indexes the document table

use std::collections::BTreeMap;

use crate::fuzzy::BkTree;
use crate::types::{DocOrdinal, IndexStats, PostingList};
use crate::util::{Normalizer, StopWords};

#[derive(Debug, Clone)]
pub struct Index {
    documents: Vec<String>,
    postings: BTreeMap<String, PostingList>,
    tree: BkTree,
    stop_words: StopWords,
}

impl Index {
    /// Assemble an index from already-validated parts.
    pub(crate) fn from_parts(
        documents: Vec<String>,
        postings: BTreeMap<String, PostingList>,
        tree: BkTree,
        stop_words: StopWords,
    ) -> Self {
        debug_assert!(documents.windows(2).all(|w| w[0] < w[1]));
        debug_assert_eq!(postings.len(), tree.len());
        debug_assert!(postings.values().all(|l| !l.postings.is_empty()));

        Self {
            documents,
            postings,
            tree,
            stop_words,
        }
    }

    /// Build an index from in-memory `(document id, text)` pairs.
    ///
    /// Texts sharing an id are merged into one document.
    pub fn from_documents<I, K, V>(documents: I, stop_words: StopWords) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        crate::build::index_documents(documents, stop_words)
    }

    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    pub fn doc_id(&self, doc: DocOrdinal) -> Option<&str> {
        self.documents.get(doc.index()).map(String::as_str)
    }

    /// Document ids in ascending order; position is the [`DocOrdinal`].
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Vocabulary in ascending order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term)
    }

    /// `(term, postings)` in ascending term order.
    pub fn posting_lists(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.postings.iter().map(|(t, l)| (t.as_str(), l))
    }

    /// Distinct documents containing `term` (0 if absent).
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings
            .get(term)
            .map_or(0, PostingList::document_frequency)
    }

    /// Total occurrences of `term` across the corpus (0 if absent).
    pub fn collection_frequency(&self, term: &str) -> u64 {
        self.postings
            .get(term)
            .map_or(0, |l| l.collection_frequency)
    }

    pub fn tree(&self) -> &BkTree {
        &self.tree
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// The tokenizer this index was built with. Queries must use the same one.
    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.stop_words)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            doc_count: self.doc_count(),
            term_count: self.term_count(),
            posting_count: self.postings.values().map(|l| l.postings.len()).sum(),
            token_count: self.postings.values().map(|l| l.collection_frequency).sum(),
            stop_word_count: self.stop_words.len(),
            tree_depth: self.tree.depth(),
        }
    }
}
