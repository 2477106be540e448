//! Fan-in of per-scale candidates into one ranked result list.

use std::cmp::Ordering;

use crate::matching::result::MatchResult;

/// Boxes overlapping beyond this IoU are treated as the same detection.
const OVERLAP_IOU: f32 = 0.5;

/// Merge candidates from every evaluated scale: suppress near-duplicate
/// boxes across scales, order by confidence (ties prefer the scale closest
/// to 1.0), and cap the list at `limit`.
pub(crate) fn rank(mut candidates: Vec<MatchResult>, limit: usize) -> Vec<MatchResult> {
    candidates.sort_by(rank_order);

    let mut ranked: Vec<MatchResult> = Vec::new();
    for candidate in candidates {
        let duplicate = ranked.iter().any(|kept| kept.iou(&candidate) > OVERLAP_IOU);
        if !duplicate {
            ranked.push(candidate);
        }
    }

    ranked.truncate(limit);
    ranked
}

fn rank_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            let a_distance = (a.scale - 1.0).abs();
            let b_distance = (b.scale - 1.0).abs();
            a_distance.partial_cmp(&b_distance).unwrap_or(Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_keep_the_higher_confidence() {
        let candidates = vec![
            MatchResult::new(100, 100, 50, 50, 0.85, 0.9),
            MatchResult::new(102, 103, 50, 50, 0.95, 1.0),
            MatchResult::new(300, 300, 50, 50, 0.82, 1.0),
        ];

        let ranked = rank(candidates, 100);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].confidence, 0.95);
        assert_eq!(ranked[1].x, 300);
    }

    #[test]
    fn mildly_overlapping_boxes_both_survive() {
        // IoU of a half-shifted pair is ~0.14, well under the threshold.
        let candidates = vec![
            MatchResult::new(0, 0, 100, 100, 0.9, 1.0),
            MatchResult::new(50, 50, 100, 100, 0.85, 1.0),
        ];

        assert_eq!(rank(candidates, 100).len(), 2);
    }

    #[test]
    fn results_are_ordered_by_confidence_descending() {
        let candidates = vec![
            MatchResult::new(0, 0, 10, 10, 0.81, 1.0),
            MatchResult::new(200, 0, 10, 10, 0.99, 1.0),
            MatchResult::new(400, 0, 10, 10, 0.9, 1.0),
        ];

        let ranked = rank(candidates, 100);
        let confidences: Vec<f32> = ranked.iter().map(|m| m.confidence).collect();
        assert_eq!(confidences, vec![0.99, 0.9, 0.81]);
    }

    #[test]
    fn confidence_ties_prefer_scale_closest_to_one() {
        let candidates = vec![
            MatchResult::new(0, 0, 10, 10, 0.9, 0.5),
            MatchResult::new(200, 0, 10, 10, 0.9, 1.0),
            MatchResult::new(400, 0, 10, 10, 0.9, 0.8),
        ];

        let ranked = rank(candidates, 100);
        let scales: Vec<f32> = ranked.iter().map(|m| m.scale).collect();
        assert_eq!(scales, vec![1.0, 0.8, 0.5]);
    }

    #[test]
    fn list_is_truncated_to_the_limit() {
        let candidates: Vec<MatchResult> = (0..10)
            .map(|i| MatchResult::new(i * 100, 0, 10, 10, 0.9, 1.0))
            .collect();

        assert_eq!(rank(candidates, 3).len(), 3);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(rank(Vec::new(), 100).is_empty());
    }
}
