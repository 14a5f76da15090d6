// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind a single posting's contribution.
//!
//! ```text
//! contribution = freq / (df * (1 + distance))
//! ```
//!
//! | Factor     | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `freq`     | more occurrences in the document, higher score       |
//! | `df`       | term appears in fewer documents, higher score        |
//! | `distance` | exact match (0) weighs most; each edit divides more  |
//!
//! An exact match always beats a fuzzy match of the same term statistics:
//! `1 / (1 + 0) > 1 / (1 + d)` for every `d >= 1`.
//!
//! `tests/search/ranking.rs` pins exact values on a small corpus.

/// Score contributed by one posting of a matched term.
///
/// `document_frequency` is at least 1 for any term with a posting; zero is
/// clamped to 1.
#[inline]
pub fn term_contribution(freq: u32, document_frequency: usize, distance: usize) -> f64 {
    let df = document_frequency.max(1) as f64;
    f64::from(freq) / (df * (1.0 + distance as f64))
}
