//! Damaged, incomplete, or inconsistent artifact sets never load.

use std::fs;
use std::path::Path;

use fuzzdex::binary::{frame, unframe, ArtifactFooter, ArtifactKind, MANIFEST_FILE};
use fuzzdex::{ErrorKind, IndexStore, Manifest};
use tempfile::TempDir;

use crate::common::{artifact, field_notes_index};

fn saved() -> TempDir {
    let dir = TempDir::new().unwrap();
    IndexStore::save(&field_notes_index(), dir.path()).unwrap();
    dir
}

fn manifest(dir: &Path) -> Manifest {
    serde_json::from_slice(&artifact(dir, MANIFEST_FILE)).unwrap()
}

fn write_manifest(dir: &Path, manifest: &Manifest) {
    fs::write(dir.join(MANIFEST_FILE), serde_json::to_vec(manifest).unwrap()).unwrap();
}

/// Replace an artifact and update the manifest to match, so the damage has to
/// be caught by the frame or content checks.
fn replace_consistently(dir: &Path, kind: ArtifactKind, bytes: &[u8]) {
    fs::write(dir.join(kind.file_name()), bytes).unwrap();
    let mut m = manifest(dir);
    let entry = m.artifacts.get_mut(kind.file_name()).unwrap();
    entry.len = bytes.len() as u64;
    entry.crc32 = ArtifactFooter::compute_crc32(bytes);
    write_manifest(dir, &m);
}

fn assert_corrupt(dir: &Path, mentions: &str) {
    let err = IndexStore::load(dir).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptIndex, "{}", err);
    assert!(err.to_string().contains(mentions), "{:?} not in {}", mentions, err);
}

#[test]
fn test_nonexistent_directory_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = IndexStore::load(&dir.path().join("nope")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_file_instead_of_directory_is_not_found() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("index");
    fs::write(&file, b"not an index").unwrap();
    assert_eq!(IndexStore::load(&file).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_empty_directory_is_corrupt() {
    let dir = TempDir::new().unwrap();
    assert_corrupt(dir.path(), MANIFEST_FILE);
}

#[test]
fn test_missing_manifest() {
    let dir = saved();
    fs::remove_file(dir.path().join(MANIFEST_FILE)).unwrap();
    assert_corrupt(dir.path(), MANIFEST_FILE);
}

#[test]
fn test_unparseable_manifest() {
    let dir = saved();
    fs::write(dir.path().join(MANIFEST_FILE), b"{\"format_version\": ").unwrap();
    assert_corrupt(dir.path(), "unparseable");
}

#[test]
fn test_future_format_version() {
    let dir = saved();
    let mut m = manifest(dir.path());
    m.format_version += 1;
    write_manifest(dir.path(), &m);
    assert_corrupt(dir.path(), "format version");
}

#[test]
fn test_every_missing_artifact() {
    for kind in ArtifactKind::ALL {
        let dir = saved();
        fs::remove_file(dir.path().join(kind.file_name())).unwrap();
        assert_corrupt(dir.path(), kind.file_name());
    }
}

#[test]
fn test_artifact_not_listed() {
    let dir = saved();
    let mut m = manifest(dir.path());
    m.artifacts.remove(ArtifactKind::Postings.file_name());
    write_manifest(dir.path(), &m);
    assert_corrupt(dir.path(), "not listed");
}

#[test]
fn test_flipped_byte_anywhere() {
    for kind in ArtifactKind::ALL {
        let dir = saved();
        let mut bytes = artifact(dir.path(), kind.file_name());
        let middle = bytes.len() / 2;
        bytes[middle] ^= 0x40;
        fs::write(dir.path().join(kind.file_name()), &bytes).unwrap();
        assert_corrupt(dir.path(), kind.file_name());
    }
}

#[test]
fn test_truncated_artifact() {
    let dir = saved();
    let name = ArtifactKind::BkTree.file_name();
    let bytes = artifact(dir.path(), name);
    fs::write(dir.path().join(name), &bytes[..bytes.len() - 3]).unwrap();
    assert_corrupt(dir.path(), name);
}

#[test]
fn test_footer_checksum_checked_without_manifest_help() {
    let dir = saved();
    let kind = ArtifactKind::Documents;
    let mut bytes = artifact(dir.path(), kind.file_name());
    bytes[14] ^= 0x01;
    replace_consistently(dir.path(), kind, &bytes);
    assert_corrupt(dir.path(), kind.file_name());
}

#[test]
fn test_wrong_kind_in_frame() {
    let dir = saved();
    let docs = artifact(dir.path(), ArtifactKind::Documents.file_name());
    let (header, payload) = unframe(ArtifactKind::Documents, &docs).unwrap();
    let mislabeled = frame(ArtifactKind::StopWords, header.count, payload).unwrap();
    replace_consistently(dir.path(), ArtifactKind::Documents, &mislabeled);
    assert_corrupt(dir.path(), ArtifactKind::Documents.file_name());
}

#[test]
fn test_header_count_disagrees() {
    let dir = saved();
    let kind = ArtifactKind::Documents;
    let bytes = artifact(dir.path(), kind.file_name());
    let (header, payload) = unframe(kind, &bytes).unwrap();
    let recounted = frame(kind, header.count + 1, payload).unwrap();
    replace_consistently(dir.path(), kind, &recounted);
    assert_corrupt(dir.path(), "header says");
}

#[test]
fn test_manifest_count_disagrees() {
    let dir = saved();
    let mut m = manifest(dir.path());
    m.term_count += 1;
    write_manifest(dir.path(), &m);
    assert_corrupt(dir.path(), "manifest says");
}

#[test]
fn test_unsorted_documents() {
    let dir = saved();
    let mut payload = Vec::new();
    fuzzdex::binary::encode_varint(5, &mut payload);
    for id in ["rec_002", "rec_001", "rec_003", "rec_004", "rec_005"] {
        fuzzdex::binary::encode_varint(id.len() as u64, &mut payload);
        payload.extend_from_slice(id.as_bytes());
    }
    let bytes = frame(ArtifactKind::Documents, 5, &payload).unwrap();
    replace_consistently(dir.path(), ArtifactKind::Documents, &bytes);
    assert_corrupt(dir.path(), "is not after");
}

#[test]
fn test_posting_points_past_document_table() {
    let dir = saved();
    // Drop the last document: postings for rec_004 now point out of range
    let mut payload = Vec::new();
    fuzzdex::binary::encode_varint(3, &mut payload);
    for id in ["rec_001", "rec_002", "rec_003"] {
        fuzzdex::binary::encode_varint(id.len() as u64, &mut payload);
        payload.extend_from_slice(id.as_bytes());
    }
    let bytes = frame(ArtifactKind::Documents, 3, &payload).unwrap();
    replace_consistently(dir.path(), ArtifactKind::Documents, &bytes);
    let mut m = manifest(dir.path());
    m.doc_count = 3;
    write_manifest(dir.path(), &m);
    assert_corrupt(dir.path(), "points at document");
}

#[test]
fn test_tree_from_other_vocabulary() {
    let dir = saved();
    let other = TempDir::new().unwrap();
    // Same number of terms, different words
    let words: Vec<String> = (0..21).map(|i| format!("impostor{}", i)).collect();
    let impostor =
        fuzzdex::Index::from_documents([("x", words.join(" "))], fuzzdex::StopWords::new());
    assert_eq!(impostor.term_count(), field_notes_index().term_count());
    IndexStore::save(&impostor, other.path()).unwrap();
    let tree = artifact(other.path(), ArtifactKind::BkTree.file_name());
    replace_consistently(dir.path(), ArtifactKind::BkTree, &tree);
    assert_corrupt(dir.path(), "not in the vocabulary");
}

#[test]
fn test_interrupted_save_does_not_load() {
    let dir = saved();
    // A save that died before the manifest rename leaves only the temp file
    fs::rename(
        dir.path().join(MANIFEST_FILE),
        dir.path().join(format!("{}.tmp", MANIFEST_FILE)),
    )
    .unwrap();
    assert_corrupt(dir.path(), MANIFEST_FILE);
}
