// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Indexing a transcript corpus.
//!
//! One pass over the corpus directory: list transcripts, tokenize them in
//! parallel, merge the per-document counts into posting lists, and grow the
//! BK-tree from the resulting vocabulary. Unreadable files are skipped and
//! reported in [`BuildDiagnostics`]; one bad transcript never sinks a batch.
//! Only a missing corpus directory, or one where every transcript failed, is
//! an error.

pub mod corpus;
pub mod parallel;

use std::path::Path;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
use log::info;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::types::BuildDiagnostics;
use crate::util::{Normalizer, StopWords};

pub use corpus::{doc_id_for, list_transcripts, CorpusFile, CorpusListing};
pub use parallel::{assemble_index, count_terms, index_documents, CountedDocument, TermCounts};

/// Knobs for corpus scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Only files with this extension (case-insensitive) are transcripts.
    /// `None` accepts every regular file.
    pub extension: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            extension: Some("txt".to_string()),
        }
    }
}

/// Build an index over every `.txt` transcript in `corpus_dir`.
pub fn build_index(corpus_dir: &Path, stop_words: &StopWords) -> Result<(Index, BuildDiagnostics)> {
    build_index_with_options(corpus_dir, stop_words, &BuildOptions::default())
}

pub fn build_index_with_options(
    corpus_dir: &Path,
    stop_words: &StopWords,
    options: &BuildOptions,
) -> Result<(Index, BuildDiagnostics)> {
    run(
        corpus_dir,
        stop_words,
        options,
        #[cfg(feature = "parallel")]
        None,
    )
}

/// Same as [`build_index_with_options`], advancing `progress` once per transcript.
#[cfg(feature = "parallel")]
pub fn build_index_with_progress(
    corpus_dir: &Path,
    stop_words: &StopWords,
    options: &BuildOptions,
    progress: &ProgressBar,
) -> Result<(Index, BuildDiagnostics)> {
    run(corpus_dir, stop_words, options, Some(progress))
}

fn run(
    corpus_dir: &Path,
    stop_words: &StopWords,
    options: &BuildOptions,
    #[cfg(feature = "parallel")] progress: Option<&ProgressBar>,
) -> Result<(Index, BuildDiagnostics)> {
    let listing = list_transcripts(corpus_dir, options.extension.as_deref())?;
    let candidates = listing.candidates();

    #[cfg(feature = "parallel")]
    {
        if let Some(progress) = progress {
            progress.set_length(listing.files.len() as u64);
        }
    }

    let results = parallel::count_transcripts(
        &listing.files,
        Normalizer::new(stop_words),
        #[cfg(feature = "parallel")]
        progress,
    );

    let mut diagnostics = BuildDiagnostics {
        skipped: listing.skipped,
        ..BuildDiagnostics::default()
    };
    let mut documents = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(doc) => documents.push(doc),
            Err(skipped) => diagnostics.skipped.push(skipped),
        }
    }
    diagnostics.files_processed = documents.len();
    diagnostics.files_skipped = diagnostics.skipped.len();

    if candidates > 0 && documents.is_empty() {
        return Err(Error::CorpusEmpty {
            path: corpus_dir.to_path_buf(),
            skipped: diagnostics.files_skipped,
        });
    }

    let index = assemble_index(documents, stop_words.clone());
    diagnostics.documents_indexed = index.doc_count();
    diagnostics.terms_indexed = index.term_count();

    info!(
        "Indexed {} documents ({} terms) from {}; {} files skipped",
        diagnostics.documents_indexed,
        diagnostics.terms_indexed,
        corpus_dir.display(),
        diagnostics.files_skipped
    );

    Ok((index, diagnostics))
}
