// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core types for the transcript index.
//!
//! Documents are addressed internally by a dense [`DocOrdinal`] into the
//! index's sorted document table. Because that table is sorted by document id,
//! comparing ordinals is the same as comparing ids, which the ranking tie-break
//! relies on.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Position of a document in the index's sorted document table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocOrdinal(pub u32);

impl DocOrdinal {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// (document, term frequency in that document)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc: DocOrdinal,
    pub freq: u32,
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.doc.0, self.freq)
    }
}

/// All postings of one term.
///
/// # Invariants
///
/// - `postings` is non-empty, sorted by `doc`, one entry per document
/// - every `freq` is at least 1
/// - `collection_frequency` is the sum of all `freq`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    pub postings: Vec<Posting>,
    pub collection_frequency: u64,
}

impl PostingList {
    /// Number of distinct documents containing the term.
    #[inline]
    pub fn document_frequency(&self) -> usize {
        self.postings.len()
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
}

/// A transcript the indexer could not use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of an indexing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildDiagnostics {
    /// Transcripts read and tokenized.
    pub files_processed: usize,
    /// Transcripts that could not be read (see `skipped`).
    pub files_skipped: usize,
    /// Distinct document ids in the index.
    pub documents_indexed: usize,
    /// Vocabulary size.
    pub terms_indexed: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Shape of a built index, for inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub doc_count: usize,
    pub term_count: usize,
    pub posting_count: usize,
    pub token_count: u64,
    pub stop_word_count: usize,
    pub tree_depth: usize,
}
