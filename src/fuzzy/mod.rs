// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy search: typo tolerance via edit distance.
//!
//! The distance function lives in `levenshtein`; `bktree` indexes the whole
//! vocabulary under that metric so a lookup only touches the branches the
//! triangle inequality cannot rule out.

mod bktree;
mod levenshtein;

pub use bktree::{BkNode, BkTree, NodeId, TermMatch};
pub use levenshtein::levenshtein;
