// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for indexing, persistence, and loading.
//!
//! Queries never fail: blank input, zero `top_k`, and vocabulary misses all
//! come back as empty result lists. Everything that can fail lives on the
//! build and load paths and lands in one of four kinds.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unusable caller input (corpus directory, stop-word file).
    Input,
    /// The filesystem refused a read or write.
    Io,
    /// The index directory does not exist.
    NotFound,
    /// Persisted artifacts exist but are malformed, truncated, or mismatched.
    CorruptIndex,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read corpus directory {}: {source}", path.display())]
    CorpusUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("none of the {skipped} transcripts in {} could be read", path.display())]
    CorpusEmpty { path: PathBuf, skipped: usize },

    #[error("cannot read stop-word file {}: {source}", path.display())]
    StopWords {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("index directory {} does not exist", .0.display())]
    IndexNotFound(PathBuf),

    #[error("corrupt index artifact {artifact}: {reason}")]
    CorruptIndex { artifact: String, reason: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CorpusUnreadable { .. } | Error::CorpusEmpty { .. } => ErrorKind::Io,
            Error::StopWords { .. } => ErrorKind::Input,
            Error::IndexNotFound(_) => ErrorKind::NotFound,
            Error::CorruptIndex { .. } => ErrorKind::CorruptIndex,
            Error::Write { .. } | Error::Read { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn corrupt(artifact: &str, reason: impl Into<String>) -> Self {
        Error::CorruptIndex {
            artifact: artifact.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
