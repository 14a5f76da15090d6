// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy full-text search over field-recording transcripts.
//!
//! Every transcript becomes a bag of normalized terms. The vocabulary goes
//! into a BK-tree, so a query term with a typo or a transcription slip still
//! finds the terms it was meant to match, and the posting lists turn those
//! terms into ranked documents.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌───────────────┐
//! │ util         │───▶│ build        │───▶│ index         │
//! │ (Normalizer, │    │ (corpus scan,│    │ (documents,   │
//! │  StopWords)  │    │  rayon merge)│    │  postings,    │
//! └──────────────┘    └──────────────┘    │  BK-tree)     │
//!                                         └───────┬───────┘
//!        ┌────────────────────────┬───────────────┤
//!        ▼                        ▼               ▼
//! ┌──────────────┐    ┌───────────────────┐ ┌───────────┐
//! │ fuzzy        │◀───│ search            │ │ binary    │
//! │ (levenshtein,│    │ (QueryEngine,     │ │ (Index-   │
//! │  BkTree)     │    │  scoring/ranking) │ │  Store)   │
//! └──────────────┘    └───────────────────┘ └───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use fuzzdex::{Index, QueryEngine, StopWords};
//!
//! let index = Index::from_documents(
//!     [("a", "the cat sat"), ("b", "the dog sat")],
//!     StopWords::from_words(["the"]),
//! );
//!
//! let hits = QueryEngine::new(&index).find_relevant_documents_within("dot", 5, 1);
//! assert_eq!(hits[0].doc_id, "b");
//! ```
//!
//! # Features
//!
//! - `parallel` (default): rayon for transcript tokenization and query term
//!   expansion, indicatif progress for the indexer
//! - `unicode-normalization` (default): NFC-compose tokens before lowercasing,
//!   so decomposed and precomposed accents index the same

pub mod binary;
pub mod build;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod scoring;
pub mod search;
pub mod types;
pub mod util;

pub use binary::{IndexStore, Manifest};
#[cfg(feature = "parallel")]
pub use build::build_index_with_progress;
pub use build::{build_index, build_index_with_options, BuildOptions};
pub use error::{Error, ErrorKind, Result};
pub use fuzzy::{levenshtein, BkTree, TermMatch};
pub use index::Index;
pub use search::{QueryEngine, QueryOptions, DEFAULT_EXACT_MATCH_MAX_LEN, DEFAULT_MAX_EDIT_DISTANCE};
pub use types::{
    BuildDiagnostics, DocOrdinal, IndexStats, Posting, PostingList, SearchHit, SkippedFile,
};
pub use util::{normalize_token, Normalizer, StopWords};
