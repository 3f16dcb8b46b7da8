//! Ranking: cross-candidate normalization, ordering, and truncation.

use std::cmp::Ordering;

use crate::search::scorer::ScoredCandidate;

/// Normalize, order, and truncate the scored candidates to the top `k`.
///
/// `final_score` becomes `fused_score / max(fused_score)` over this query's
/// candidate set; when every fused score is exactly 0 the final scores are
/// all 0 instead of dividing by zero. An empty candidate set returns empty.
///
/// Ordering is total and deterministic: descending final score, then
/// descending quality (records without a rating sort last), then ascending
/// id. Because the ordering is total, truncation is stable: growing `k`
/// only appends lower-ranked entries.
pub fn rank(mut candidates: Vec<ScoredCandidate>, k: usize) -> Vec<ScoredCandidate> {
    if candidates.is_empty() {
        return candidates;
    }

    let max_fused = candidates
        .iter()
        .map(|c| c.fused_score)
        .fold(0.0_f32, f32::max);

    for candidate in &mut candidates {
        candidate.final_score = if max_fused > 0.0 {
            candidate.fused_score / max_fused
        } else {
            0.0
        };
    }

    candidates.sort_by(compare);
    candidates.truncate(k);
    candidates
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.final_score
        .partial_cmp(&a.final_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            let qa = a.quality.unwrap_or(f32::NEG_INFINITY);
            let qb = b.quality.unwrap_or(f32::NEG_INFINITY);
            qb.partial_cmp(&qa).unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u32, fused: f32, quality: Option<f32>) -> ScoredCandidate {
        ScoredCandidate {
            row: id as usize,
            id,
            quality,
            text_score: 0.0,
            fuzzy_score: 0.0,
            metadata_score: 0.0,
            fused_score: fused,
            final_score: 0.0,
        }
    }

    #[test]
    fn test_best_candidate_normalizes_to_one() {
        let ranked = rank(vec![candidate(1, 0.5, None), candidate(2, 0.25, None)], 10);
        assert_eq!(ranked[0].id, 1);
        assert!((ranked[0].final_score - 1.0).abs() < 1e-6);
        assert!((ranked[1].final_score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_all_zero_scores_stay_zero() {
        let ranked = rank(vec![candidate(1, 0.0, None), candidate(2, 0.0, None)], 10);
        assert!(ranked.iter().all(|c| c.final_score == 0.0));
    }

    #[test]
    fn test_empty_candidates() {
        assert!(rank(Vec::new(), 5).is_empty());
    }

    #[test]
    fn test_quality_breaks_score_ties() {
        let ranked = rank(
            vec![
                candidate(1, 0.4, Some(6.0)),
                candidate(2, 0.4, Some(8.0)),
                candidate(3, 0.4, None),
            ],
            10,
        );
        assert_eq!(ranked.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn test_id_breaks_full_ties() {
        let ranked = rank(
            vec![candidate(9, 0.4, None), candidate(3, 0.4, None)],
            10,
        );
        assert_eq!(ranked.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3, 9]);
    }

    #[test]
    fn test_truncation_is_stable_under_growing_k() {
        let candidates = vec![
            candidate(1, 0.9, None),
            candidate(2, 0.7, Some(7.0)),
            candidate(3, 0.7, Some(5.0)),
            candidate(4, 0.2, None),
        ];
        let top2 = rank(candidates.clone(), 2);
        let top4 = rank(candidates, 4);
        assert_eq!(
            top2.iter().map(|c| c.id).collect::<Vec<_>>(),
            top4.iter().take(2).map(|c| c.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_fewer_than_k_returns_all() {
        let ranked = rank(vec![candidate(1, 0.4, None)], 10);
        assert_eq!(ranked.len(), 1);
    }
}
