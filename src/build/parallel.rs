// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel transcript loading and index assembly.
//!
//! Reading and tokenizing transcripts is embarrassingly parallel: every file
//! becomes an independent term-frequency map. Rayon handles that phase with
//! `par_iter()`. The merge into posting lists is a commutative union of
//! per-document maps keyed by document id, so it runs single-threaded at the
//! end and produces the same index whatever order the files were read in.
//!
//! Determinism falls out of using ordered maps on the merge side: documents
//! get ordinals in id order, terms are inserted into the BK-tree in
//! lexicographic order, and each posting list is appended in ordinal order.

use std::collections::{BTreeMap, HashMap};
use std::fs;

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::warn;

use crate::fuzzy::BkTree;
use crate::index::Index;
use crate::types::{DocOrdinal, Posting, PostingList, SkippedFile};
use crate::util::{Normalizer, StopWords};

use super::corpus::CorpusFile;

/// Term frequencies of one document.
pub type TermCounts = HashMap<String, u32>;

/// A transcript after tokenization.
#[derive(Debug, Clone)]
pub struct CountedDocument {
    pub doc_id: String,
    pub counts: TermCounts,
}

/// Count the terms of one text.
pub fn count_terms(text: &str, normalizer: Normalizer<'_>) -> TermCounts {
    let mut counts = TermCounts::new();
    for term in normalizer.normalize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

fn count_file(
    file: &CorpusFile,
    normalizer: Normalizer<'_>,
) -> Result<CountedDocument, SkippedFile> {
    match fs::read_to_string(&file.path) {
        Ok(text) => Ok(CountedDocument {
            doc_id: file.doc_id.clone(),
            counts: count_terms(&text, normalizer),
        }),
        Err(e) => {
            warn!("Skipping {}: {}", file.path.display(), e);
            Err(SkippedFile {
                path: file.path.clone(),
                reason: e.to_string(),
            })
        }
    }
}

/// Read and count every transcript in parallel.
#[cfg(feature = "parallel")]
pub fn count_transcripts(
    files: &[CorpusFile],
    normalizer: Normalizer<'_>,
    progress: Option<&ProgressBar>,
) -> Vec<Result<CountedDocument, SkippedFile>> {
    let counter = AtomicUsize::new(0);
    let total = files.len();

    files
        .par_iter()
        .map(|file| {
            let result = count_file(file, normalizer);

            if let Some(progress) = progress {
                let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
                progress.set_position(count as u64);
                if count % 10 == 0 || count == total {
                    progress.set_message(format!("{}/{}", count, total));
                }
            }

            result
        })
        .collect()
}

/// Read and count every transcript.
/// Sequential fallback without the `parallel` feature.
#[cfg(not(feature = "parallel"))]
pub fn count_transcripts(
    files: &[CorpusFile],
    normalizer: Normalizer<'_>,
) -> Vec<Result<CountedDocument, SkippedFile>> {
    files.iter().map(|file| count_file(file, normalizer)).collect()
}

/// Merge per-document counts into an index.
///
/// Documents sharing an id are summed into one document.
pub fn assemble_index<I>(documents: I, stop_words: StopWords) -> Index
where
    I: IntoIterator<Item = CountedDocument>,
{
    let mut by_id: BTreeMap<String, TermCounts> = BTreeMap::new();
    for doc in documents {
        let merged = by_id.entry(doc.doc_id).or_default();
        if merged.is_empty() {
            *merged = doc.counts;
        } else {
            for (term, freq) in doc.counts {
                *merged.entry(term).or_insert(0) += freq;
            }
        }
    }

    let mut postings: BTreeMap<String, PostingList> = BTreeMap::new();
    let mut documents = Vec::with_capacity(by_id.len());

    for (ordinal, (doc_id, counts)) in by_id.into_iter().enumerate() {
        let doc = DocOrdinal(ordinal as u32);
        for (term, freq) in counts {
            let list = postings.entry(term).or_default();
            list.postings.push(Posting { doc, freq });
            list.collection_frequency += u64::from(freq);
        }
        documents.push(doc_id);
    }

    // Ordinals were handed out in ascending order, so every list is sorted
    let tree: BkTree = postings.keys().collect();

    Index::from_parts(documents, postings, tree, stop_words)
}

/// Build an index from in-memory texts.
pub fn index_documents<I, K, V>(documents: I, stop_words: StopWords) -> Index
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let counted: Vec<CountedDocument> = {
        let normalizer = Normalizer::new(&stop_words);
        documents
            .into_iter()
            .map(|(id, text)| CountedDocument {
                doc_id: id.into(),
                counts: count_terms(text.as_ref(), normalizer),
            })
            .collect()
    };
    assemble_index(counted, stop_words)
}
