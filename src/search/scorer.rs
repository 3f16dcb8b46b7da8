//! Candidate scoring: three independent sub-scores fused by fixed weights.

use serde::{Deserialize, Serialize};

use crate::corpus::MovieRecord;
use crate::index::{SparseVector, TextIndex};
use crate::query::ParsedQuery;
use crate::search::filter::{genre_matches, person_matches};
use crate::util::fuzzy;

/// Scoring policy: fusion weights, metadata boosts, and the quality gate.
///
/// These are fixed constants of the ranking function, not per-query knobs;
/// they live in one structure so tuning never touches the scoring logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Fusion weight of the TF-IDF cosine score.
    pub text_weight: f32,
    /// Fusion weight of the fuzzy title score.
    pub fuzzy_weight: f32,
    /// Fusion weight of the metadata boost score.
    pub metadata_weight: f32,
    /// Metadata credit for a genre match.
    pub genre_boost: f32,
    /// Metadata credit for a person match.
    pub person_boost: f32,
    /// Metadata credit for temporal proximity.
    pub year_boost: f32,
    /// Metadata credit for a high quality rating.
    pub quality_boost: f32,
    /// Rating a record must exceed to earn the quality credit.
    pub quality_threshold: f32,
    /// Upper bound on the additive metadata score.
    pub metadata_cap: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            text_weight: 0.4,
            fuzzy_weight: 0.2,
            metadata_weight: 0.4,
            genre_boost: 0.3,
            person_boost: 0.4,
            year_boost: 0.2,
            quality_boost: 0.15,
            quality_threshold: 7.0,
            metadata_cap: 1.0,
        }
    }
}

/// One scored candidate. Transient: created per query, dropped once the
/// ranked results have been materialized.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// Corpus row of the record.
    pub row: usize,
    /// Record id, for deterministic tie-breaking.
    pub id: u32,
    /// Record quality, for tie-breaking.
    pub quality: Option<f32>,
    /// TF-IDF cosine similarity, in [0, 1].
    pub text_score: f32,
    /// Fuzzy title similarity, in [0, 1].
    pub fuzzy_score: f32,
    /// Metadata boost, in [0, 1].
    pub metadata_score: f32,
    /// Weighted sum of the three sub-scores.
    pub fused_score: f32,
    /// Fused score divided by the query's maximum fused score; set by the
    /// ranking engine.
    pub final_score: f32,
}

/// Score one surviving candidate.
///
/// `query_vector` is the vectorized residual text, computed once per query.
/// Every sub-score is finite and bounded to [0, 1]; missing record fields
/// contribute 0 to their term, never an error.
pub fn score(
    record: &MovieRecord,
    row: usize,
    query: &ParsedQuery,
    index: &TextIndex,
    query_vector: &SparseVector,
    config: &ScoringConfig,
) -> ScoredCandidate {
    let text_score = index.similarity(query_vector, row);
    let fuzzy_score = fuzzy_title_score(&query.residual_text, &record.title);
    let metadata_score = metadata_boost(record, query, config);

    let fused_score = config.text_weight * text_score
        + config.fuzzy_weight * fuzzy_score
        + config.metadata_weight * metadata_score;

    ScoredCandidate {
        row,
        id: record.id,
        quality: record.quality,
        text_score,
        fuzzy_score,
        metadata_score,
        fused_score,
        final_score: 0.0,
    }
}

/// Partial-ratio similarity between the raw query and the title, rescaled
/// from [0, 100] to [0, 1].
fn fuzzy_title_score(query: &str, title: &str) -> f32 {
    if query.trim().is_empty() || title.is_empty() {
        return 0.0;
    }
    fuzzy::partial_ratio(&query.to_lowercase(), &title.to_lowercase()) / 100.0
}

/// Additive metadata boost, capped.
///
/// Year credit is binary: full when the record's year falls inside the
/// parsed range or when no range was given, zero otherwise (an unknown year
/// earns nothing against an active range).
fn metadata_boost(record: &MovieRecord, query: &ParsedQuery, config: &ScoringConfig) -> f32 {
    let mut boost = 0.0;

    if !query.genres.is_empty() && genre_matches(record, &query.genres) {
        boost += config.genre_boost;
    }

    if !query.people.is_empty() && person_matches(record, &query.people) {
        boost += config.person_boost;
    }

    match query.year_range {
        None => boost += config.year_boost,
        Some((from, to)) => {
            if let Some(year) = record.year {
                if year >= from && year <= to {
                    boost += config.year_boost;
                }
            }
        }
    }

    if let Some(quality) = record.quality {
        if quality > config.quality_threshold {
            boost += config.quality_boost;
        }
    }

    boost.min(config.metadata_cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexBuilder, IndexConfig};
    use crate::query::QueryParser;

    fn record(id: u32) -> MovieRecord {
        MovieRecord {
            id,
            title: "Beverly Hills Cop".to_string(),
            year: Some(1984),
            genres: vec!["comedy".to_string(), "action".to_string()],
            director: Some("Martin Brest".to_string()),
            cast: vec!["Eddie Murphy".to_string()],
            synopsis: "A detective visits Beverly Hills.".to_string(),
            quality: Some(7.3),
        }
    }

    fn scored(query_text: &str, record: &MovieRecord) -> ScoredCandidate {
        let records = vec![record.clone()];
        let index = IndexBuilder::new(IndexConfig::default())
            .build(&records)
            .unwrap();
        let query = QueryParser::new().parse(query_text);
        let query_vector = index.vectorize(&query.residual_text);
        score(
            record,
            0,
            &query,
            &index,
            &query_vector,
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_all_sub_scores_bounded() {
        let c = scored("comedy films in the 80s starring Eddie Murphy", &record(1));
        for s in [c.text_score, c.fuzzy_score, c.metadata_score] {
            assert!((0.0..=1.0).contains(&s), "sub-score out of range: {s}");
        }
        assert!(c.fused_score.is_finite());
    }

    #[test]
    fn test_metadata_boost_accumulates_and_caps() {
        // Genre + person + year + quality = 1.05, capped to 1.0.
        let c = scored("comedy films in the 80s starring Eddie Murphy", &record(1));
        assert!((c.metadata_score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_year_credit_without_range_is_full() {
        let c = scored("comedy starring Eddie Murphy", &record(1));
        // genre 0.3 + person 0.4 + year 0.2 + quality 0.15, capped.
        assert!((c.metadata_score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_year_earns_nothing_against_active_range() {
        let mut r = record(1);
        r.year = None;
        r.quality = Some(5.0);
        let records = vec![r.clone()];
        let index = IndexBuilder::new(IndexConfig::default())
            .build(&records)
            .unwrap();
        let query = QueryParser::new().parse("drama from the 80s");
        let query_vector = index.vectorize(&query.residual_text);
        let c = score(&r, 0, &query, &index, &query_vector, &ScoringConfig::default());
        assert_eq!(c.metadata_score, 0.0);
    }

    #[test]
    fn test_missing_fields_score_zero_not_error() {
        let r = MovieRecord {
            id: 9,
            title: String::new(),
            year: None,
            genres: vec![],
            director: None,
            cast: vec![],
            synopsis: String::new(),
            quality: None,
        };
        let records = vec![r.clone()];
        let index = IndexBuilder::new(IndexConfig::default())
            .build(&records)
            .unwrap();
        let query = QueryParser::new().parse("anything at all");
        let query_vector = index.vectorize(&query.residual_text);
        let c = score(&r, 0, &query, &index, &query_vector, &ScoringConfig::default());
        assert_eq!(c.text_score, 0.0);
        assert_eq!(c.fuzzy_score, 0.0);
        // No range given, so the year credit still applies.
        assert!((c.metadata_score - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_fuzzy_score_rescaled() {
        let c = scored("beverly hills cop", &record(1));
        assert!((c.fuzzy_score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fusion_weights() {
        let c = scored("comedy films in the 80s starring Eddie Murphy", &record(1));
        let expected = 0.4 * c.text_score + 0.2 * c.fuzzy_score + 0.4 * c.metadata_score;
        assert!((c.fused_score - expected).abs() < 1e-6);
    }
}
