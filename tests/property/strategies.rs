//! Input generators shared by the property suites.

use proptest::prelude::*;

/// Short words over a small alphabet, so random pairs are often close.
pub fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{1,7}").unwrap()
}

/// Words with multi-byte characters mixed in.
pub fn unicode_word() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "čas".to_string(),
        "cas".to_string(),
        "řeky".to_string(),
        "reky".to_string(),
        "über".to_string(),
        "uber".to_string(),
        "café".to_string(),
        "cafe".to_string(),
        "tōkyō".to_string(),
        "తెలుగు".to_string(),
        "river".to_string(),
    ])
}

pub fn vocabulary() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop_oneof![4 => word(), 1 => unicode_word()], 0..40)
}

/// A few documents with unique ids `d00`, `d01`, ...
pub fn corpus() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(prop::collection::vec(word(), 0..12), 1..8).prop_map(|docs| {
        docs.into_iter()
            .enumerate()
            .map(|(i, words)| (format!("d{:02}", i), words.join(" ")))
            .collect()
    })
}

/// A query of one to three words, sometimes with stray punctuation and case.
pub fn query() -> impl Strategy<Value = String> {
    prop::collection::vec((word(), prop::bool::ANY), 1..4).prop_map(|words| {
        words
            .into_iter()
            .map(|(w, shout)| if shout { format!("{}!", w.to_uppercase()) } else { w })
            .collect::<Vec<_>>()
            .join(" ")
    })
}
