// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact decoding under adversarial input.
//!
//! A saved index is read back from disk, and disks lie: truncated writes,
//! flipped bits, someone else's file with the same name. Every decoder must
//! answer `Err` for bad input and uphold its invariants for good input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use fuzzdex::binary::{decode_postings, decode_tree, unframe, ArtifactKind};

fuzz_target!(|data: &[u8]| {
    // Frames: random input should almost always fail the checksum
    for kind in ArtifactKind::ALL {
        let _ = unframe(kind, data);
    }

    // Raw payloads skip the checksum so the decoders themselves get exercised
    let doc_count = data.first().copied().unwrap_or(0) as usize;
    let payload = data.get(1..).unwrap_or_default();

    if let Ok(lists) = decode_postings(payload, doc_count) {
        for (term, list) in &lists {
            assert!(!term.is_empty());
            assert!(!list.postings.is_empty());
            assert!(list.postings.windows(2).all(|w| w[0].doc < w[1].doc));
            assert!(list.postings.iter().all(|p| p.doc.index() < doc_count && p.freq >= 1));
            let sum: u64 = list.postings.iter().map(|p| u64::from(p.freq)).sum();
            assert_eq!(sum, list.collection_frequency);
        }
    }

    if let Ok(tree) = decode_tree(payload) {
        // A tree that decodes must find each of its own terms
        for term in tree.terms() {
            assert!(tree.contains(term));
        }
    }
});
