//! The search engine facade: one frozen index, many queries.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::corpus::{CorpusSource, MovieRecord};
use crate::error::Result;
use crate::index::{IndexBuilder, IndexConfig, TextIndex};
use crate::query::QueryParser;
use crate::search::scorer::ScoringConfig;
use crate::search::{filter, ranker, scorer};
use crate::storage::{self, IndexArtifact};

/// One search result entry, as exposed to front ends.
///
/// Carries the three raw sub-scores alongside the normalized final score
/// for transparency and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Record id.
    pub id: u32,
    /// Record title.
    pub title: String,
    /// Release year, if known.
    pub year: Option<i32>,
    /// Canonical genres.
    pub genres: Vec<String>,
    /// Cast plus director.
    pub people: Vec<String>,
    /// Normalized relevance in [0, 1].
    pub final_score: f32,
    /// Raw TF-IDF cosine sub-score.
    pub text_score: f32,
    /// Raw fuzzy title sub-score.
    pub fuzzy_score: f32,
    /// Raw metadata boost sub-score.
    pub metadata_score: f32,
}

/// Summary of a built index.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexStats {
    /// Number of records indexed.
    pub doc_count: u32,
    /// Number of terms in the frozen vocabulary.
    pub vocabulary_size: usize,
    /// When the index build finished.
    pub built_at: DateTime<Utc>,
}

/// A fully built, immutable search engine.
///
/// Owns the corpus snapshot and the text index built over it, kept
/// row-aligned. Nothing is mutated after construction, so a shared engine
/// can serve concurrent queries without locking. Rebuilding means
/// constructing a new engine and dropping this one.
#[derive(Debug)]
pub struct SearchEngine {
    records: Vec<MovieRecord>,
    index: TextIndex,
    parser: QueryParser,
    scoring: ScoringConfig,
    built_at: DateTime<Utc>,
}

impl SearchEngine {
    /// Build an engine over the given records.
    ///
    /// One-shot and exclusive: fails with a source-data error on duplicate
    /// record ids, in which case nothing is kept.
    pub fn build(records: Vec<MovieRecord>, config: IndexConfig) -> Result<Self> {
        let index = IndexBuilder::new(config).build(&records)?;
        Ok(SearchEngine {
            records,
            index,
            parser: QueryParser::new(),
            scoring: ScoringConfig::default(),
            built_at: Utc::now(),
        })
    }

    /// Build an engine by reading all records from a corpus source.
    pub fn from_source(source: &dyn CorpusSource, config: IndexConfig) -> Result<Self> {
        Self::build(source.records()?, config)
    }

    /// Replace the scoring policy. Intended for tests and tuning harnesses;
    /// production callers keep the default fixed policy.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Run one query and return the ranked top `k` hits.
    ///
    /// Infallible: an unparseable or empty query degrades to "no
    /// constraints" and is scored on text and fuzzy similarity alone; a
    /// query whose filters admit no candidates returns an empty vec.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        let parsed = self.parser.parse(query);
        let candidate_rows = filter::filter(&self.records, &parsed);
        let query_vector = self.index.vectorize(&parsed.residual_text);

        let scored = candidate_rows
            .into_iter()
            .map(|row| {
                scorer::score(
                    &self.records[row],
                    row,
                    &parsed,
                    &self.index,
                    &query_vector,
                    &self.scoring,
                )
            })
            .collect();

        let ranked = ranker::rank(scored, k);
        debug!(query, k, hits = ranked.len(), "search completed");

        ranked
            .into_iter()
            .map(|candidate| {
                let record = &self.records[candidate.row];
                SearchHit {
                    id: record.id,
                    title: record.title.clone(),
                    year: record.year,
                    genres: record.genres.clone(),
                    people: record.people().iter().map(|p| p.to_string()).collect(),
                    final_score: candidate.final_score,
                    text_score: candidate.text_score,
                    fuzzy_score: candidate.fuzzy_score,
                    metadata_score: candidate.metadata_score,
                }
            })
            .collect()
    }

    /// Summary counters for the built index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            doc_count: self.index.doc_count(),
            vocabulary_size: self.index.vocabulary_size(),
            built_at: self.built_at,
        }
    }

    /// The corpus snapshot this engine was built over, in row order.
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Persist the engine as a durable artifact, replacing any existing one.
    pub fn save(&self, path: &Path) -> Result<()> {
        let artifact = IndexArtifact {
            built_at: self.built_at,
            records: self.records.clone(),
            index: self.index.clone(),
        };
        storage::save(path, &artifact)
    }

    /// Load an engine from a durable artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let artifact = storage::load(path)?;
        Ok(SearchEngine {
            records: artifact.records,
            index: artifact.index,
            parser: QueryParser::new(),
            scoring: ScoringConfig::default(),
            built_at: artifact.built_at,
        })
    }
}
