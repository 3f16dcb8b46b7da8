//! Canonical genre vocabulary and synonym expansion.
//!
//! Matching scans the raw query for every known genre or synonym token as a
//! whole word (hyphenated forms like "sci-fi" count, since `-` is a word
//! boundary), case-insensitively. A synonym entry may expand to more than one
//! canonical genre ("romcom" is both romance and comedy). All matches are
//! unioned.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

/// Canonical genre names as they appear on records.
pub const CANONICAL_GENRES: &[&str] = &[
    "action",
    "adventure",
    "animation",
    "comedy",
    "crime",
    "documentary",
    "drama",
    "family",
    "fantasy",
    "history",
    "horror",
    "music",
    "mystery",
    "romance",
    "science fiction",
    "thriller",
    "war",
    "western",
];

/// Synonym tokens and the canonical genres they expand to.
const GENRE_SYNONYMS: &[(&str, &[&str])] = &[
    ("sci-fi", &["science fiction"]),
    ("sci fi", &["science fiction"]),
    ("scifi", &["science fiction"]),
    ("romcom", &["romance", "comedy"]),
    ("rom-com", &["romance", "comedy"]),
    ("kid", &["family"]),
    ("kids", &["family"]),
];

lazy_static! {
    /// One whole-word pattern per known token, paired with its expansion.
    static ref GENRE_PATTERNS: Vec<(Regex, Vec<&'static str>)> = {
        let mut patterns = Vec::new();
        for &genre in CANONICAL_GENRES {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(genre)))
                .expect("valid genre pattern");
            patterns.push((re, vec![genre]));
        }
        for &(token, expansions) in GENRE_SYNONYMS {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(token)))
                .expect("valid synonym pattern");
            patterns.push((re, expansions.to_vec()));
        }
        patterns
    };
}

/// Extract the union of canonical genres mentioned in the query.
///
/// Returned sorted for determinism.
pub fn extract_genres(query: &str) -> Vec<String> {
    let mut found: BTreeSet<&'static str> = BTreeSet::new();
    for (pattern, expansions) in GENRE_PATTERNS.iter() {
        if pattern.is_match(query) {
            found.extend(expansions.iter().copied());
        }
    }
    found.into_iter().map(String::from).collect()
}
