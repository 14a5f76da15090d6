// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact framing: fixed header, payload, CRC footer.
//!
//! Every binary artifact of a saved index is one frame:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ HEADER (12 bytes)                            │
//! │   magic: [u8; 4] = "FDEX"                    │
//! │   version: u8                                │
//! │   kind: u8  (documents/postings/bktree/stop) │
//! │   reserved: [u8; 2]                          │
//! │   count: u32 (entries in the payload)        │
//! ├──────────────────────────────────────────────┤
//! │ PAYLOAD (varint-encoded, see `encoding`)     │
//! ├──────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "XEDF"       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The CRC covers header and payload. A frame whose magic, version, kind, or
//! checksum is off is rejected before a single payload byte is decoded.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "FDEX" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"FDEX";

/// Footer magic: "XEDF" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"XEDF";

/// Current on-disk format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (a corrupt count must not turn into a huge allocation)
// ============================================================================

/// Maximum artifact size: 1 GiB
pub const MAX_ARTIFACT_SIZE: usize = 1 << 30;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// ARTIFACT KINDS
// ============================================================================

/// The four binary artifacts of a saved index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ArtifactKind {
    Documents = 1,
    Postings = 2,
    BkTree = 3,
    StopWords = 4,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Documents,
        ArtifactKind::Postings,
        ArtifactKind::BkTree,
        ArtifactKind::StopWords,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Documents => "documents.fdx",
            ArtifactKind::Postings => "postings.fdx",
            ArtifactKind::BkTree => "bktree.fdx",
            ArtifactKind::StopWords => "stopwords.fdx",
        }
    }

    fn from_u8(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| *k as u8 == byte)
    }
}

// ============================================================================
// HEADER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub version: u8,
    pub kind: ArtifactKind,
    pub count: u32,
}

impl ArtifactHeader {
    // 4 (magic) + 1 (version) + 1 (kind) + 2 (reserved) + 4 (count) = 12
    pub const SIZE: usize = 12;

    pub fn new(kind: ArtifactKind, count: u32) -> Self {
        Self {
            version: VERSION,
            kind,
            count,
        }
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version, self.kind as u8])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&self.count.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected FDEX, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 8]; // 12 - 4 (magic)
        r.read_exact(&mut buf)?;

        let version = buf[0];
        if version != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unsupported format version {} (expected {})", version, VERSION),
            ));
        }

        let kind = ArtifactKind::from_u8(buf[1]).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown artifact kind {}", buf[1]),
            )
        })?;

        // buf[2..4] is reserved
        Ok(Self {
            version,
            kind,
            count: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactFooter {
    /// CRC32 of header + payload
    pub crc32: u32,
}

impl ArtifactFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    /// Parse the footer from the last 8 bytes of `bytes`.
    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        let Some(footer_start) = bytes.len().checked_sub(Self::SIZE) else {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        };

        let footer = &bytes[footer_start..];
        if footer[4..] != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected XEDF, got {:?}", &footer[4..]),
            ));
        }

        Ok(Self {
            crc32: u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]),
        })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

// ============================================================================
// FRAMING
// ============================================================================

/// Wrap `payload` in a header and footer.
pub fn frame(kind: ArtifactKind, count: u32, payload: &[u8]) -> io::Result<Vec<u8>> {
    let mut buf =
        Vec::with_capacity(ArtifactHeader::SIZE + payload.len() + ArtifactFooter::SIZE);
    ArtifactHeader::new(kind, count).write(&mut buf)?;
    buf.extend_from_slice(payload);

    let crc32 = ArtifactFooter::compute_crc32(&buf);
    ArtifactFooter { crc32 }.write(&mut buf)?;
    Ok(buf)
}

/// Check a frame of the expected kind and return its header and payload.
pub fn unframe(expected: ArtifactKind, bytes: &[u8]) -> io::Result<(ArtifactHeader, &[u8])> {
    if bytes.len() > MAX_ARTIFACT_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Artifact too large: {} bytes", bytes.len()),
        ));
    }
    if bytes.len() < ArtifactHeader::SIZE + ArtifactFooter::SIZE {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Artifact truncated to {} bytes", bytes.len()),
        ));
    }

    let footer = ArtifactFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - ArtifactFooter::SIZE];
    let computed = ArtifactFooter::compute_crc32(content);
    if footer.crc32 != computed {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "CRC32 mismatch: footer says {:08x}, content is {:08x}",
                footer.crc32, computed
            ),
        ));
    }

    let mut reader = content;
    let header = ArtifactHeader::read(&mut reader)?;
    if header.kind != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Expected {:?} artifact, found {:?}", expected, header.kind),
        ));
    }

    Ok((header, &content[ArtifactHeader::SIZE..]))
}
