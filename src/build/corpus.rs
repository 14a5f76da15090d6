// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Transcript discovery.
//!
//! A corpus is a flat directory of UTF-8 text files, one per recording. The
//! document id is the file name without its extension. Subdirectories and
//! dotfiles are ignored; files whose name is not valid UTF-8 are reported as
//! skipped since they have no usable id.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{Error, Result};
use crate::types::SkippedFile;

/// A transcript file and the document id derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    pub path: PathBuf,
    pub doc_id: String,
}

/// Result of scanning a corpus directory.
#[derive(Debug, Default)]
pub struct CorpusListing {
    /// Sorted by path.
    pub files: Vec<CorpusFile>,
    /// Entries that looked like transcripts but could not be used.
    pub skipped: Vec<SkippedFile>,
}

impl CorpusListing {
    pub fn candidates(&self) -> usize {
        self.files.len() + self.skipped.len()
    }
}

/// Document id for a transcript path: the file stem.
pub fn doc_id_for(path: &Path) -> Option<String> {
    path.file_stem()?.to_str().map(str::to_string)
}

fn has_extension(path: &Path, extension: Option<&str>) -> bool {
    match extension {
        None => true,
        Some(wanted) => path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(wanted)),
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// List the transcripts in `dir`.
///
/// Fails only if the directory itself cannot be opened. Per-entry problems end
/// up in `skipped`.
pub fn list_transcripts(dir: &Path, extension: Option<&str>) -> Result<CorpusListing> {
    let entries = fs::read_dir(dir).map_err(|source| Error::CorpusUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut listing = CorpusListing::default();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                listing.skipped.push(SkippedFile {
                    path: dir.to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        if is_hidden(&path) || !path.is_file() || !has_extension(&path, extension) {
            continue;
        }

        match doc_id_for(&path) {
            Some(doc_id) if !doc_id.is_empty() => listing.files.push(CorpusFile { path, doc_id }),
            _ => {
                warn!("Skipping {}: file name is not valid UTF-8", path.display());
                listing.skipped.push(SkippedFile {
                    path,
                    reason: "file name is not valid UTF-8".to_string(),
                });
            }
        }
    }

    listing.files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(listing)
}
