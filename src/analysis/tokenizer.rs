//! Word-gram tokenizer used by the text indexer.
//!
//! Splits text on Unicode word boundaries (UAX #29), which drops punctuation
//! and whitespace segments, lowercases the result, removes English stopwords,
//! and then emits every unigram plus every adjacent bigram of the surviving
//! token sequence. Bigram terms are space-joined ("science fiction").
//!
//! # Examples
//!
//! ```
//! use marquee::analysis::TextTokenizer;
//!
//! let tokenizer = TextTokenizer::new();
//! let terms = tokenizer.terms("The Quiet Earth");
//! assert_eq!(terms, vec!["quiet", "earth", "quiet earth"]);
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use unicode_segmentation::UnicodeSegmentation;

/// Common English words filtered out before gram emission.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Minimum and maximum word-gram length emitted per token window.
const MIN_GRAM: usize = 1;
const MAX_GRAM: usize = 2;

/// A tokenizer producing lowercase word unigrams and bigrams.
///
/// Stateless and cheap to clone; the index holds one and reuses it for every
/// record and query.
#[derive(Clone, Debug, Default)]
pub struct TextTokenizer;

impl TextTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        TextTokenizer
    }

    /// Lowercased word tokens with punctuation and stopwords removed.
    fn words(&self, text: &str) -> Vec<String> {
        let folded = text.to_lowercase();
        folded
            .unicode_words()
            .filter(|w| !STOP_WORDS.contains(w))
            .map(|w| w.to_string())
            .collect()
    }

    /// All index terms for the given text: unigrams plus adjacent bigrams.
    ///
    /// Stopwords are removed before bigram formation, so "raiders of the
    /// lost ark" yields the bigram "lost ark". Empty input yields an empty
    /// term list.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let words = self.words(text);
        let mut terms = Vec::with_capacity(words.len() * 2);
        for n in MIN_GRAM..=MAX_GRAM {
            if n > words.len() {
                break;
            }
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}
