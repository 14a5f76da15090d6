// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Arbitrary bytes as queries against a fixed index. Queries never fail, so
//! the only acceptable outcomes are an empty list or a ranked one.

#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use fuzzdex::{Index, QueryEngine, StopWords};

fn index() -> &'static Index {
    static INDEX: OnceLock<Index> = OnceLock::new();
    INDEX.get_or_init(|| {
        Index::from_documents(
            [
                ("rec_001", "the cat sat on the mat"),
                ("rec_002", "the dog sat by the door"),
                ("rec_003", "čas je dobrý a pes spí"),
                ("rec_004", "rain on the tin roof, rain again"),
            ],
            StopWords::from_words(["the", "on", "a"]),
        )
    })
}

fuzz_target!(|data: &[u8]| {
    let Some((&k, query)) = data.split_first() else {
        return;
    };
    let query = String::from_utf8_lossy(query);
    let engine = QueryEngine::new(index());

    let hits = engine.find_relevant_documents_within(&query, 10, usize::from(k % 4));
    assert!(hits.len() <= 10);
    for w in hits.windows(2) {
        assert!(
            w[0].score > w[1].score || (w[0].score == w[1].score && w[0].doc_id < w[1].doc_id)
        );
    }
    assert!(hits.iter().all(|h| h.score.is_finite() && h.score > 0.0));
});
