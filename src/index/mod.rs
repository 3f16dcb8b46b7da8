//! Vector-space text index: TF-IDF weighted term vectors over the corpus.
//!
//! The index is built once from the full record set and frozen: the
//! vocabulary, its dimensionality, and every record vector are fixed at build
//! time. A record not present at build time cannot be scored. Queries are
//! vectorized through the same tokenizer and vocabulary, so out-of-vocabulary
//! query terms simply vanish: a fully out-of-vocabulary query produces a
//! zero vector and similarity 0 everywhere, which is not an error.

pub mod builder;
pub mod vector;

pub use builder::{IndexBuilder, IndexConfig};
pub use vector::SparseVector;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::TextTokenizer;

/// The frozen vector-space representation of the corpus.
///
/// Vector row `i` corresponds to record `i` in the corpus table the index
/// was built from; the search engine keeps the two aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextIndex {
    /// Term to dimension index. Size-bounded at build time.
    vocabulary: AHashMap<String, u32>,
    /// Document frequency per dimension.
    doc_freq: Vec<u32>,
    /// Smoothed inverse document frequency per dimension.
    idf: Vec<f32>,
    /// One L2-normalized vector per corpus row.
    vectors: Vec<SparseVector>,
    /// Number of documents the index was built over.
    doc_count: u32,
    /// Shared tokenizer; stateless, so not persisted.
    #[serde(skip)]
    tokenizer: TextTokenizer,
}

impl TextIndex {
    pub(crate) fn new(
        vocabulary: AHashMap<String, u32>,
        doc_freq: Vec<u32>,
        idf: Vec<f32>,
        vectors: Vec<SparseVector>,
        doc_count: u32,
    ) -> Self {
        TextIndex {
            vocabulary,
            doc_freq,
            idf,
            vectors,
            doc_count,
            tokenizer: TextTokenizer::new(),
        }
    }

    /// Number of terms in the frozen vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the index was built over.
    pub fn doc_count(&self) -> u32 {
        self.doc_count
    }

    /// Document frequency of a term, if the term is in the vocabulary.
    pub fn doc_freq(&self, term: &str) -> Option<u32> {
        self.vocabulary
            .get(term)
            .map(|&dim| self.doc_freq[dim as usize])
    }

    /// Vectorize arbitrary text into the index's term space.
    ///
    /// TF-IDF weighted and L2-normalized. Terms outside the frozen
    /// vocabulary are dropped; text with no in-vocabulary terms yields a
    /// zero vector.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let terms = self.tokenizer.terms(text);
        if terms.is_empty() {
            return SparseVector::default();
        }

        let mut counts: AHashMap<u32, f32> = AHashMap::new();
        for term in &terms {
            if let Some(&dim) = self.vocabulary.get(term) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let token_count = terms.len() as f32;
        let entries = counts
            .into_iter()
            .map(|(dim, count)| (dim, (count / token_count) * self.idf[dim as usize]))
            .collect();

        let mut vector = SparseVector::from_entries(entries);
        vector.normalize();
        vector
    }

    /// Cosine similarity between a query vector and the record at `row`.
    ///
    /// Clamped to [0, 1]. Rows outside the corpus score 0.
    pub fn similarity(&self, query: &SparseVector, row: usize) -> f32 {
        match self.vectors.get(row) {
            Some(vector) => query.cosine(vector),
            None => 0.0,
        }
    }
}
