// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization shared by indexing and querying.
//!
//! Both sides of a lookup must agree on what a term is, so there is exactly one
//! tokenizer: split on whitespace, compose, lowercase, drop everything that is
//! not a letter or digit, drop stop words. "Don't" becomes "dont", "well-known"
//! becomes "wellknown", and a lone "—" disappears.
//!
//! Diacritics are kept. Transcripts come from languages where "č" and "c" are
//! different letters, so folding them would merge unrelated words. What we do
//! fold is the *encoding*: with the `unicode-normalization` feature the input is
//! NFC-composed first, so "c" + U+030C and the precomposed "č" produce the same
//! term. Without composition the combining mark is not alphanumeric and would be
//! silently stripped, turning "č" into "c" for some inputs and not others.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Normalize a single token: compose, lowercase, keep alphanumerics only.
///
/// May return an empty string (e.g. for pure punctuation).
#[cfg(feature = "unicode-normalization")]
pub fn normalize_token(token: &str) -> String {
    token
        .nfc()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Lightweight variant without NFC composition. Assumes pre-composed input.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize_token(token: &str) -> String {
    token
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Externally supplied set of terms excluded from indexing and querying.
///
/// Entries are stored normalized, so "The" in the file matches "the" in text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize_token(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Words that are already normalized, e.g. read back from a saved index.
    pub(crate) fn from_normalized<I>(words: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            words: words.into_iter().collect(),
        }
    }

    /// Parse a stop-word list: one word per line, commas also separate.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.split(|c| c == '\n' || c == ','))
    }

    /// Read a UTF-8 stop-word file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::StopWords {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text))
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stop words in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Tokenizer bound to a stop-word set.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    stop_words: &'a StopWords,
}

impl<'a> Normalizer<'a> {
    pub fn new(stop_words: &'a StopWords) -> Self {
        Self { stop_words }
    }

    /// Turn free text into the sequence of indexable terms, in text order.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(normalize_token)
            .filter(|t| !t.is_empty() && !self.stop_words.contains(t))
            .collect()
    }
}
