// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the varint (LEB128) codec.
//!
//! Every count, length, ordinal, and edge label on disk is a varint. Garbage
//! in must give `Err`, never a panic or a value that silently wrapped.

#![no_main]

use libfuzzer_sys::fuzz_target;
use fuzzdex::binary::{decode_varint, encode_varint, MAX_VARINT_BYTES};

fuzz_target!(|data: &[u8]| {
    let Ok((value, consumed)) = decode_varint(data) else {
        return;
    };

    assert!(consumed >= 1 && consumed <= data.len().min(MAX_VARINT_BYTES));

    // Re-encoding gives the canonical form, which decodes to the same value
    let mut reencoded = Vec::new();
    encode_varint(value, &mut reencoded);
    let (redecoded, reconsumed) =
        decode_varint(&reencoded).expect("canonical varint must decode");
    assert_eq!(value, redecoded);
    assert_eq!(reconsumed, reencoded.len());
    assert!(reencoded.len() <= consumed);
});
