// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varints, length-prefixed strings, and a
//! bounds-checked cursor to read them back.
//!
//! Every count read from disk is checked against the bytes that remain before
//! anything is allocated for it, so a flipped bit in a length field produces an
//! `InvalidData` error instead of a multi-gigabyte `Vec::with_capacity`.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>

use std::io;

use super::header::MAX_VARINT_BYTES;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    let mut result: u64 = 0;
    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        let low = u64::from(byte & 0x7F);
        // The tenth byte may only carry the single top bit of a u64
        if i == MAX_VARINT_BYTES - 1 && low > 1 {
            return Err(invalid("Varint overflows u64"));
        }
        result |= low << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
    }

    if bytes.len() >= MAX_VARINT_BYTES {
        Err(invalid("Varint exceeds maximum length (possible corruption)"))
    } else {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "Incomplete varint"))
    }
}

/// Length-prefixed UTF-8 string
pub fn encode_str(s: &str, buf: &mut Vec<u8>) {
    encode_varint(s.len() as u64, buf);
    buf.extend_from_slice(s.as_bytes());
}

/// Count-prefixed list of strings
pub fn encode_strings<I, S>(strings: I, buf: &mut Vec<u8>)
where
    I: ExactSizeIterator<Item = S>,
    S: AsRef<str>,
{
    encode_varint(strings.len() as u64, buf);
    for s in strings {
        encode_str(s.as_ref(), buf);
    }
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

// ============================================================================
// CURSOR
// ============================================================================

/// Sequential reader over a payload.
#[derive(Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn varint(&mut self) -> io::Result<u64> {
        let (value, consumed) = decode_varint(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    pub fn u32(&mut self, what: &str) -> io::Result<u32> {
        let value = self.varint()?;
        u32::try_from(value).map_err(|_| invalid(format!("{} {} exceeds u32", what, value)))
    }

    /// A count of entries that each take at least `min_entry_bytes`.
    pub fn count(&mut self, what: &str, min_entry_bytes: usize) -> io::Result<usize> {
        let count = self.varint()?;
        let budget = self.remaining() / min_entry_bytes.max(1);
        if count > budget as u64 {
            return Err(invalid(format!(
                "{} count {} exceeds available bytes {}",
                what,
                count,
                self.remaining()
            )));
        }
        Ok(count as usize)
    }

    pub fn string(&mut self) -> io::Result<String> {
        let len = self.varint()?;
        if len > self.remaining() as u64 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated string (expected {} bytes, {} left)", len, self.remaining()),
            ));
        }
        let end = self.pos + len as usize;
        let s = std::str::from_utf8(&self.bytes[self.pos..end])
            .map_err(|e| invalid(format!("Invalid UTF-8 at byte {}: {}", self.pos, e)))?
            .to_string();
        self.pos = end;
        Ok(s)
    }

    pub fn strings(&mut self, what: &str) -> io::Result<Vec<String>> {
        let count = self.count(what, 1)?;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.string()?);
        }
        Ok(out)
    }

    /// Fail if anything is left unread.
    pub fn finish(self) -> io::Result<()> {
        if self.remaining() != 0 {
            return Err(invalid(format!("{} trailing bytes", self.remaining())));
        }
        Ok(())
    }
}
