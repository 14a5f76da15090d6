// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting list encoding/decoding.
//!
//! Doc ordinals within a list are strictly increasing, so they are stored as
//! deltas: documents 3, 4, 9 become [3, 1, 5]. Small deltas make short varints.
//!
//! Format:
//! - term_count: varint
//! - For each term (ascending, no duplicates):
//!   - term: varint length + UTF-8
//!   - collection_frequency: varint
//!   - doc_freq: varint (at least 1)
//!   - For each posting: doc_delta varint, freq varint
//!
//! Decoding re-checks everything the index relies on: term order, non-empty
//! lists, ordinals in range, freq >= 1, and that the stored collection
//! frequency is the sum of the freqs.

use std::collections::BTreeMap;
use std::io;

use super::encoding::{encode_str, encode_varint, Cursor};
use crate::types::{DocOrdinal, Posting, PostingList};

pub fn encode_postings<'a, I>(lists: I, term_count: usize, buf: &mut Vec<u8>)
where
    I: IntoIterator<Item = (&'a str, &'a PostingList)>,
{
    encode_varint(term_count as u64, buf);
    for (term, list) in lists {
        encode_str(term, buf);
        encode_varint(list.collection_frequency, buf);
        encode_varint(list.postings.len() as u64, buf);

        let mut prev = 0u32;
        for posting in &list.postings {
            encode_varint(u64::from(posting.doc.0 - prev), buf);
            encode_varint(u64::from(posting.freq), buf);
            prev = posting.doc.0;
        }
    }
}

pub fn decode_postings(
    bytes: &[u8],
    doc_count: usize,
) -> io::Result<BTreeMap<String, PostingList>> {
    let invalid = |msg: String| io::Error::new(io::ErrorKind::InvalidData, msg);

    let mut cursor = Cursor::new(bytes);
    // term (>=1 byte) + cf + df + one posting (2 bytes)
    let term_count = cursor.count("term", 5)?;
    let mut lists = BTreeMap::new();
    let mut prev_term: Option<String> = None;

    for _ in 0..term_count {
        let term = cursor.string()?;
        if term.is_empty() {
            return Err(invalid("empty term in vocabulary".to_string()));
        }
        if prev_term.as_ref().is_some_and(|p| *p >= term) {
            return Err(invalid(format!("term {:?} out of order", term)));
        }

        let collection_frequency = cursor.varint()?;
        let doc_freq = cursor.count("posting", 2)?;
        if doc_freq == 0 {
            return Err(invalid(format!("term {:?} has no postings", term)));
        }

        let mut postings = Vec::with_capacity(doc_freq);
        let mut sum = 0u64;
        let mut doc = 0u64;
        for i in 0..doc_freq {
            let delta = cursor.varint()?;
            if i > 0 && delta == 0 {
                return Err(invalid(format!("term {:?} lists a document twice", term)));
            }
            doc = doc.saturating_add(delta);
            if doc >= doc_count as u64 {
                return Err(invalid(format!(
                    "term {:?} points at document {} of {}",
                    term, doc, doc_count
                )));
            }

            let freq = cursor.u32("term frequency")?;
            if freq == 0 {
                return Err(invalid(format!("term {:?} has a zero frequency", term)));
            }
            sum += u64::from(freq);

            // doc < doc_count <= u32::MAX, so the cast is lossless
            postings.push(Posting {
                doc: DocOrdinal(doc as u32),
                freq,
            });
        }

        if sum != collection_frequency {
            return Err(invalid(format!(
                "term {:?} collection frequency {} but postings sum to {}",
                term, collection_frequency, sum
            )));
        }

        prev_term = Some(term.clone());
        lists.insert(
            term,
            PostingList {
                postings,
                collection_frequency,
            },
        );
    }

    cursor.finish()?;
    Ok(lists)
}
