//! Building from a transcript directory.

use std::path::Path;

use fuzzdex::{build_index, build_index_with_options, BuildOptions, ErrorKind, StopWords};

use crate::common::{scenario_stop_words, write_corpus, write_transcripts, SCENARIO};

#[test]
fn test_scenario_from_directory() {
    let dir = write_transcripts(&SCENARIO);
    let (index, diag) = build_index(dir.path(), &scenario_stop_words()).unwrap();

    assert_eq!(index.documents(), &["a", "b"]);
    assert_eq!(index.vocabulary().collect::<Vec<_>>(), vec!["cat", "dog", "sat"]);
    assert_eq!(diag.files_processed, 2);
    assert_eq!(diag.files_skipped, 0);
    assert_eq!(diag.documents_indexed, 2);
    assert_eq!(diag.terms_indexed, 3);
}

#[test]
fn test_directory_matches_in_memory_build() {
    let dir = write_transcripts(&SCENARIO);
    let (from_dir, _) = build_index(dir.path(), &scenario_stop_words()).unwrap();
    let in_memory = fuzzdex::Index::from_documents(SCENARIO, scenario_stop_words());

    assert_eq!(from_dir.documents(), in_memory.documents());
    assert_eq!(
        from_dir.posting_lists().collect::<Vec<_>>(),
        in_memory.posting_lists().collect::<Vec<_>>()
    );
    assert_eq!(from_dir.tree(), in_memory.tree());
}

#[test]
fn test_only_transcripts_are_indexed() {
    let dir = write_corpus(&[
        ("one.txt", "alpha"),
        ("two.TXT", "beta"),
        ("notes.md", "gamma"),
        (".draft.txt", "delta"),
    ]);
    std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

    let (index, diag) = build_index(dir.path(), &StopWords::new()).unwrap();
    assert_eq!(index.documents(), &["one", "two"]);
    assert_eq!(diag.files_processed, 2);
    assert!(index.postings("gamma").is_none());
}

#[test]
fn test_any_extension_option() {
    let dir = write_corpus(&[("one.txt", "alpha"), ("notes.md", "gamma"), ("raw", "omega")]);
    let options = BuildOptions { extension: None };
    let (index, _) = build_index_with_options(dir.path(), &StopWords::new(), &options).unwrap();
    assert_eq!(index.documents(), &["notes", "one", "raw"]);
}

#[test]
fn test_custom_extension() {
    let dir = write_corpus(&[("one.txt", "alpha"), ("two.vtt", "beta")]);
    let options = BuildOptions {
        extension: Some("vtt".to_string()),
    };
    let (index, _) = build_index_with_options(dir.path(), &StopWords::new(), &options).unwrap();
    assert_eq!(index.documents(), &["two"]);
}

#[test]
fn test_unreadable_transcript_is_skipped_and_reported() {
    let dir = write_corpus(&[
        ("good.txt", b"clear speech".as_slice()),
        ("bad.txt", [0xC3, 0x28, 0xA0, 0xA1].as_slice()),
    ]);
    let (index, diag) = build_index(dir.path(), &StopWords::new()).unwrap();

    assert_eq!(index.documents(), &["good"]);
    assert_eq!(diag.files_processed, 1);
    assert_eq!(diag.files_skipped, 1);
    assert_eq!(diag.skipped.len(), 1);
    assert!(diag.skipped[0].path.ends_with("bad.txt"));
    assert!(!diag.skipped[0].reason.is_empty());
}

#[test]
fn test_every_transcript_unreadable() {
    let dir = write_corpus(&[("a.txt", [0xFFu8, 0xFE].as_slice()), ("b.txt", [0xC0u8].as_slice())]);
    let err = build_index(dir.path(), &StopWords::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("none of the 2 transcripts"));
}

#[test]
fn test_missing_corpus_directory() {
    let err = build_index(Path::new("/definitely/not/a/corpus"), &StopWords::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_empty_corpus_directory() {
    let dir = write_corpus::<&str>(&[]);
    let (index, diag) = build_index(dir.path(), &StopWords::new()).unwrap();
    assert_eq!(index.doc_count(), 0);
    assert_eq!(index.term_count(), 0);
    assert_eq!(diag.files_processed, 0);
}

#[test]
fn test_transcript_of_only_stop_words_still_counts() {
    let dir = write_transcripts(&[("quiet", "the the"), ("loud", "the bell")]);
    let (index, diag) = build_index(dir.path(), &scenario_stop_words()).unwrap();
    assert_eq!(index.doc_count(), 2);
    assert_eq!(diag.documents_indexed, 2);
    assert_eq!(index.vocabulary().collect::<Vec<_>>(), vec!["bell"]);
}
