//! One-shot index construction from a corpus table.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::TextTokenizer;
use crate::corpus::MovieRecord;
use crate::error::{MarqueeError, Result};
use crate::index::TextIndex;
use crate::index::vector::SparseVector;

/// Default cap on the number of distinct terms kept in the vocabulary.
pub const DEFAULT_MAX_VOCAB: usize = 200_000;

/// Configuration for index construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Upper bound on vocabulary size. When the corpus produces more
    /// distinct terms, the least-informative ones (lowest document
    /// frequency) are evicted at build time.
    pub max_vocab: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            max_vocab: DEFAULT_MAX_VOCAB,
        }
    }
}

/// Builds a frozen [`TextIndex`] from a record set.
///
/// Building is a one-shot, exclusive operation: the resulting index never
/// changes afterwards, and a rebuild produces a wholly new index.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    config: IndexConfig,
    tokenizer: TextTokenizer,
}

impl IndexBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: IndexConfig) -> Self {
        IndexBuilder {
            config,
            tokenizer: TextTokenizer::new(),
        }
    }

    /// Build the index over the given records.
    ///
    /// Fails with a source-data error if two records share an id; record
    /// ids must uniquely address one record for the lifetime of the index.
    pub fn build(&self, records: &[MovieRecord]) -> Result<TextIndex> {
        let mut seen_ids: AHashSet<u32> = AHashSet::with_capacity(records.len());
        for record in records {
            if !seen_ids.insert(record.id) {
                return Err(MarqueeError::source_data(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
        }

        // Tokenize every record once; term lists are reused for document
        // frequencies and for the weight vectors.
        let term_lists: Vec<Vec<String>> = records
            .iter()
            .map(|r| self.tokenizer.terms(&r.combined_text()))
            .collect();

        let mut doc_freq: AHashMap<String, u32> = AHashMap::new();
        for terms in &term_lists {
            let unique: AHashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        let vocabulary = self.select_vocabulary(doc_freq);
        let mut df = vec![0u32; vocabulary.len()];
        for &(dim, term_df) in vocabulary.values() {
            df[dim as usize] = term_df;
        }

        let doc_count = records.len() as u32;
        // Smoothed idf, so terms present in every document still carry a
        // small positive weight.
        let idf: Vec<f32> = df
            .iter()
            .map(|&term_df| ((1.0 + doc_count as f32) / (1.0 + term_df as f32)).ln() + 1.0)
            .collect();

        let dims: AHashMap<String, u32> = vocabulary
            .into_iter()
            .map(|(term, (dim, _))| (term, dim))
            .collect();

        let vectors: Vec<SparseVector> = term_lists
            .iter()
            .map(|terms| Self::weigh(terms, &dims, &idf))
            .collect();

        info!(
            docs = doc_count,
            vocabulary = dims.len(),
            "text index built"
        );
        Ok(TextIndex::new(dims, df, idf, vectors, doc_count))
    }

    /// Select the vocabulary and assign dimension indices.
    ///
    /// When the corpus exceeds `max_vocab` distinct terms, keeps the
    /// `max_vocab` terms with the highest document frequency (ties broken
    /// lexicographically). Dimensions are assigned in lexicographic term
    /// order, which makes the built artifact deterministic.
    fn select_vocabulary(&self, doc_freq: AHashMap<String, u32>) -> AHashMap<String, (u32, u32)> {
        let total = doc_freq.len();
        let mut terms: Vec<(String, u32)> = doc_freq.into_iter().collect();

        if total > self.config.max_vocab {
            terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            terms.truncate(self.config.max_vocab);
            debug!(
                kept = terms.len(),
                evicted = total - terms.len(),
                "vocabulary cap applied"
            );
        }

        terms.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        terms
            .into_iter()
            .enumerate()
            .map(|(dim, (term, term_df))| (term, (dim as u32, term_df)))
            .collect()
    }

    /// TF-IDF weigh a term list into an L2-normalized sparse vector.
    fn weigh(terms: &[String], dims: &AHashMap<String, u32>, idf: &[f32]) -> SparseVector {
        if terms.is_empty() {
            return SparseVector::default();
        }

        let mut counts: AHashMap<u32, f32> = AHashMap::new();
        for term in terms {
            if let Some(&dim) = dims.get(term) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let token_count = terms.len() as f32;
        let entries = counts
            .into_iter()
            .map(|(dim, count)| (dim, (count / token_count) * idf[dim as usize]))
            .collect();

        let mut vector = SparseVector::from_entries(entries);
        vector.normalize();
        vector
    }
}
