// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk index format and the [`IndexStore`] that reads and writes it.
//!
//! A saved index is a directory of five files:
//!
//! ```text
//! index/
//! ├── manifest.json    format version, counts, length + CRC32 of every artifact
//! ├── documents.fdx    sorted document ids (position = ordinal)
//! ├── postings.fdx     term → [(ordinal, freq)], delta+varint
//! ├── bktree.fdx       BK-tree arena, root first
//! └── stopwords.fdx    stop words the index was built with
//! ```
//!
//! Each `.fdx` file is a frame (see `header`): magic, version, kind, entry
//! count, payload, CRC32 footer. The manifest is written last, so a save that
//! dies half way leaves a directory that refuses to load rather than one that
//! loads stale data.
//!
//! # Load checks
//!
//! Loading trusts nothing. In order:
//! - the manifest parses and its version is current
//! - every artifact is listed, present, and matches the listed length and CRC32
//! - each frame has the right magic, version, kind, and checksum
//! - decoded entry counts match both the frame header and the manifest
//! - document ids are strictly ascending
//! - every posting ordinal indexes the document table
//! - the BK-tree is well formed (see [`crate::fuzzy::BkTree::from_nodes`])
//!   and holds exactly the vocabulary
//!
//! Any failure is [`Error::CorruptIndex`] naming the artifact; an index that
//! loads answers every query exactly like the one that was saved.

mod encoding;
mod header;
mod postings;
mod tree;

pub use encoding::{decode_varint, encode_varint};
pub use postings::{decode_postings, encode_postings};
pub use tree::{decode_tree, encode_tree};
pub use header::{
    frame, unframe, ArtifactFooter, ArtifactHeader, ArtifactKind, FOOTER_MAGIC, MAGIC,
    MAX_ARTIFACT_SIZE, MAX_VARINT_BYTES, VERSION,
};

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::index::Index;
use crate::util::StopWords;

use encoding::{encode_strings, Cursor};

pub const MANIFEST_FILE: &str = "manifest.json";

// ============================================================================
// MANIFEST
// ============================================================================

/// Length and checksum of one artifact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub len: u64,
    pub crc32: u32,
}

/// `manifest.json`: what a complete artifact set looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u8,
    /// Version of the crate that wrote the index.
    pub generator: String,
    pub doc_count: usize,
    pub term_count: usize,
    pub stop_word_count: usize,
    /// Keyed by file name.
    pub artifacts: BTreeMap<String, ArtifactEntry>,
}

impl Manifest {
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactEntry> {
        self.artifacts.get(kind.file_name())
    }
}

// ============================================================================
// STORE
// ============================================================================

/// Reads and writes indexes as artifact directories.
pub struct IndexStore;

impl IndexStore {
    /// Write `index` into `dir`, creating it if needed. Existing artifacts are
    /// replaced.
    pub fn save(index: &Index, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        // Drop the old manifest first: until the new one lands, the directory
        // must not look loadable.
        let manifest_path = dir.join(MANIFEST_FILE);
        match fs::remove_file(&manifest_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(Error::Write {
                    path: manifest_path,
                    source,
                })
            }
        }

        let mut artifacts = BTreeMap::new();
        for kind in ArtifactKind::ALL {
            let bytes = encode_artifact(index, kind).map_err(|source| Error::Write {
                path: dir.join(kind.file_name()),
                source,
            })?;
            let entry = ArtifactEntry {
                len: bytes.len() as u64,
                crc32: ArtifactFooter::compute_crc32(&bytes),
            };
            write_file(&dir.join(kind.file_name()), &bytes)?;
            debug!("Wrote {} ({} bytes)", kind.file_name(), entry.len);
            artifacts.insert(kind.file_name().to_string(), entry);
        }

        let manifest = Manifest {
            format_version: VERSION,
            generator: format!("fuzzdex {}", env!("CARGO_PKG_VERSION")),
            doc_count: index.doc_count(),
            term_count: index.term_count(),
            stop_word_count: index.stop_words().len(),
            artifacts,
        };
        let json = serde_json::to_vec_pretty(&manifest).map_err(|e| Error::Write {
            path: manifest_path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;

        // Temp file + rename so the manifest appears whole or not at all
        let tmp_path = dir.join(format!("{}.tmp", MANIFEST_FILE));
        write_file(&tmp_path, &json)?;
        fs::rename(&tmp_path, &manifest_path).map_err(|source| Error::Write {
            path: manifest_path,
            source,
        })?;
        Ok(())
    }

    /// Read the manifest of a saved index without loading the rest.
    pub fn manifest(dir: &Path) -> Result<Manifest> {
        if !dir.is_dir() {
            return Err(Error::IndexNotFound(dir.to_path_buf()));
        }

        let bytes = read_artifact_file(dir, MANIFEST_FILE)?;
        let manifest: Manifest = serde_json::from_slice(&bytes)
            .map_err(|e| Error::corrupt(MANIFEST_FILE, format!("unparseable: {}", e)))?;

        if manifest.format_version != VERSION {
            return Err(Error::corrupt(
                MANIFEST_FILE,
                format!(
                    "format version {} (this build reads {})",
                    manifest.format_version, VERSION
                ),
            ));
        }
        Ok(manifest)
    }

    /// Load and fully verify the index saved in `dir`.
    pub fn load(dir: &Path) -> Result<Index> {
        let manifest = Self::manifest(dir)?;

        let documents = {
            let (count, payload) = read_frame(dir, &manifest, ArtifactKind::Documents)?;
            let docs = decode_string_list(ArtifactKind::Documents, &payload)?;
            check_count(ArtifactKind::Documents, docs.len(), count, manifest.doc_count)?;
            if let Some(w) = docs.windows(2).find(|w| w[0] >= w[1]) {
                return Err(Error::corrupt(
                    ArtifactKind::Documents.file_name(),
                    format!("document {:?} is not after {:?}", w[1], w[0]),
                ));
            }
            docs
        };

        let postings = {
            let (count, payload) = read_frame(dir, &manifest, ArtifactKind::Postings)?;
            let lists = postings::decode_postings(&payload, documents.len())
                .map_err(|e| corrupt_io(ArtifactKind::Postings, e))?;
            check_count(ArtifactKind::Postings, lists.len(), count, manifest.term_count)?;
            lists
        };

        let tree = {
            let (count, payload) = read_frame(dir, &manifest, ArtifactKind::BkTree)?;
            let tree =
                tree::decode_tree(&payload).map_err(|e| corrupt_io(ArtifactKind::BkTree, e))?;
            check_count(ArtifactKind::BkTree, tree.len(), count, manifest.term_count)?;
            // Same size and unique terms, so containment means equality
            if let Some(stray) = tree.terms().find(|t| !postings.contains_key(*t)) {
                return Err(Error::corrupt(
                    ArtifactKind::BkTree.file_name(),
                    format!("term {:?} is not in the vocabulary", stray),
                ));
            }
            tree
        };

        let stop_words = {
            let (count, payload) = read_frame(dir, &manifest, ArtifactKind::StopWords)?;
            let words = decode_string_list(ArtifactKind::StopWords, &payload)?;
            check_count(ArtifactKind::StopWords, words.len(), count, manifest.stop_word_count)?;
            StopWords::from_normalized(words)
        };

        debug!(
            "Loaded index from {}: {} documents, {} terms",
            dir.display(),
            documents.len(),
            postings.len()
        );
        Ok(Index::from_parts(documents, postings, tree, stop_words))
    }
}

// ============================================================================
// ARTIFACT ENCODING
// ============================================================================

fn encode_artifact(index: &Index, kind: ArtifactKind) -> io::Result<Vec<u8>> {
    let mut payload = Vec::new();
    let count = match kind {
        ArtifactKind::Documents => {
            encode_strings(index.documents().iter(), &mut payload);
            index.doc_count()
        }
        ArtifactKind::Postings => {
            postings::encode_postings(index.posting_lists(), index.term_count(), &mut payload);
            index.term_count()
        }
        ArtifactKind::BkTree => {
            tree::encode_tree(index.tree(), &mut payload);
            index.tree().len()
        }
        ArtifactKind::StopWords => {
            let words: Vec<&str> = index.stop_words().iter().collect();
            encode_strings(words.iter(), &mut payload);
            words.len()
        }
    };

    let count = u32::try_from(count).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} entries do not fit the format", count),
        )
    })?;
    frame(kind, count, &payload)
}

fn decode_string_list(kind: ArtifactKind, payload: &[u8]) -> Result<Vec<String>> {
    let mut cursor = Cursor::new(payload);
    let strings = cursor
        .strings(kind.file_name())
        .map_err(|e| corrupt_io(kind, e))?;
    cursor.finish().map_err(|e| corrupt_io(kind, e))?;
    Ok(strings)
}

// ============================================================================
// FILE ACCESS
// ============================================================================

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Read one file of the artifact set. A missing file is corruption, not IO.
fn read_artifact_file(dir: &Path, name: &str) -> Result<Vec<u8>> {
    let path: PathBuf = dir.join(name);
    fs::read(&path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            Error::corrupt(name, "missing")
        } else {
            Error::Read { path, source }
        }
    })
}

/// Read, check against the manifest, and unframe one artifact. Returns the
/// header's entry count and the payload.
fn read_frame(dir: &Path, manifest: &Manifest, kind: ArtifactKind) -> Result<(u32, Vec<u8>)> {
    let name = kind.file_name();
    let entry = manifest
        .artifact(kind)
        .ok_or_else(|| Error::corrupt(MANIFEST_FILE, format!("{} not listed", name)))?;

    let bytes = read_artifact_file(dir, name)?;
    if bytes.len() as u64 != entry.len {
        return Err(Error::corrupt(
            name,
            format!("{} bytes, manifest says {}", bytes.len(), entry.len),
        ));
    }
    let crc32 = ArtifactFooter::compute_crc32(&bytes);
    if crc32 != entry.crc32 {
        return Err(Error::corrupt(
            name,
            format!("CRC32 {:08x}, manifest says {:08x}", crc32, entry.crc32),
        ));
    }

    let (header, payload) = unframe(kind, &bytes).map_err(|e| corrupt_io(kind, e))?;
    Ok((header.count, payload.to_vec()))
}

fn check_count(kind: ArtifactKind, decoded: usize, framed: u32, listed: usize) -> Result<()> {
    if decoded != framed as usize || decoded != listed {
        return Err(Error::corrupt(
            kind.file_name(),
            format!(
                "{} entries decoded, header says {}, manifest says {}",
                decoded, framed, listed
            ),
        ));
    }
    Ok(())
}

fn corrupt_io(kind: ArtifactKind, e: io::Error) -> Error {
    Error::corrupt(kind.file_name(), e.to_string())
}
