// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! A document's score is the sum, over query terms and their fuzzy matches, of
//! one posting's contribution. Rare terms, frequent occurrences, and close
//! matches push the score up. Ranking is score descending, then document id.

mod core;
pub mod ranking;

pub use core::*;
pub use ranking::{compare_hits, rank};
