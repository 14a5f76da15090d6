// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored documents get sorted and cut.
//!
//! Sort order:
//! 1. **Score** - descending
//! 2. **Document id** - ascending, so equal scores always come out the same way
//!
//! Scores are compared with `f64::total_cmp`, which is a total order; there is
//! no NaN to dodge since every contribution is a finite positive quotient.

use std::cmp::Ordering;

use crate::types::{DocOrdinal, SearchHit};

/// Compare two hits for ranking. `Less` means `a` ranks first.
pub fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}

/// Same order on document ordinals (ordinal order is id order).
#[inline]
fn compare_scored(a: &(DocOrdinal, f64), b: &(DocOrdinal, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Keep the `top_k` best documents, best first. Zero scores are dropped.
pub fn rank(mut scored: Vec<(DocOrdinal, f64)>, top_k: usize) -> Vec<(DocOrdinal, f64)> {
    scored.retain(|&(_, score)| score > 0.0);
    if top_k == 0 || scored.is_empty() {
        return Vec::new();
    }

    // Partial selection first: only the head needs a full sort
    if scored.len() > top_k {
        scored.select_nth_unstable_by(top_k - 1, compare_scored);
        scored.truncate(top_k);
    }
    scored.sort_unstable_by(compare_scored);
    scored
}
