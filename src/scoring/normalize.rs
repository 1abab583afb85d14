use std::collections::BTreeMap;

use super::stats::{mean, median};
use super::types::{EventResult, FetchStatus, ScoreMatrix};

/// Correct one event's raw scores for per-judge bias.
///
/// Each judge's column is rescaled so its average across the field is exactly
/// 100, which removes a harsh or lenient judge's systematic offset while
/// preserving the ordering within that judge's column. A judge whose raw
/// average is 0 yields normalized scores of 0 for the whole column rather
/// than a division by zero.
///
/// Pure function of its inputs; an empty matrix or a judge count of 0
/// produces an empty result with `max`/`min` of 0, never an error.
pub fn normalize_event(raw: ScoreMatrix, judge_count: usize, status: FetchStatus) -> EventResult {
    let judge_averages: Vec<f64> = (0..judge_count)
        .map(|i| {
            let column: Vec<f64> = raw.values().filter_map(|scores| scores.get(i).copied()).collect();
            mean(&column)
        })
        .collect();

    let normalized: ScoreMatrix = raw
        .iter()
        .map(|(group, scores)| {
            let rescaled = scores
                .iter()
                .enumerate()
                .map(|(i, &score)| {
                    let avg = judge_averages.get(i).copied().unwrap_or(0.0);
                    if avg == 0.0 {
                        0.0
                    } else {
                        score * 100.0 / avg
                    }
                })
                .collect();
            (group.clone(), rescaled)
        })
        .collect();

    let raw_average: BTreeMap<_, _> = raw
        .iter()
        .map(|(group, scores)| (group.clone(), mean(scores)))
        .collect();
    let normalized_average: BTreeMap<_, _> = normalized
        .iter()
        .map(|(group, scores)| (group.clone(), mean(scores)))
        .collect();
    let normalized_median: BTreeMap<_, _> = normalized
        .iter()
        .map(|(group, scores)| (group.clone(), median(scores)))
        .collect();

    let max = normalized_average
        .values()
        .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    let min = normalized_average
        .values()
        .fold(f64::INFINITY, |acc, &v| acc.min(v));
    let (max, min) = if normalized_average.is_empty() {
        (0.0, 0.0)
    } else {
        (max, min)
    };

    EventResult {
        raw,
        normalized,
        judge_averages,
        raw_average,
        normalized_average,
        normalized_median,
        max,
        min,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[(&str, &[f64])]) -> ScoreMatrix {
        rows.iter()
            .map(|(group, scores)| (group.to_string(), scores.to_vec()))
            .collect()
    }

    #[test]
    fn test_judge_columns_average_to_100() {
        let raw = matrix(&[
            ("Alpha", &[80.0, 90.0, 70.0]),
            ("Beta", &[90.0, 95.0, 80.0]),
            ("Gamma", &[70.0, 85.0, 60.0]),
        ]);

        let result = normalize_event(raw, 3, FetchStatus::Fetched);

        for i in 0..3 {
            let column: Vec<f64> = result
                .normalized
                .values()
                .map(|scores| scores[i])
                .collect();
            let avg = column.iter().sum::<f64>() / column.len() as f64;
            assert!((avg - 100.0).abs() < 1e-9, "judge {} average was {}", i, avg);
        }
    }

    #[test]
    fn test_normalization_preserves_column_order() {
        let raw = matrix(&[("Alpha", &[80.0, 50.0]), ("Beta", &[90.0, 40.0])]);

        let result = normalize_event(raw, 2, FetchStatus::Fetched);

        // Judge 0 scored Beta higher; judge 1 scored Alpha higher. Both
        // orderings survive rescaling.
        assert!(result.normalized["Beta"][0] > result.normalized["Alpha"][0]);
        assert!(result.normalized["Alpha"][1] > result.normalized["Beta"][1]);
    }

    #[test]
    fn test_zero_average_judge_normalizes_to_zero() {
        let raw = matrix(&[("Alpha", &[0.0, 90.0]), ("Beta", &[0.0, 85.0])]);

        let result = normalize_event(raw, 2, FetchStatus::Fetched);

        assert_eq!(result.judge_averages[0], 0.0);
        assert_eq!(result.normalized["Alpha"][0], 0.0);
        assert_eq!(result.normalized["Beta"][0], 0.0);
        // The other judge is unaffected.
        assert!(result.normalized["Alpha"][1] > 0.0);
    }

    #[test]
    fn test_empty_matrix_yields_empty_result() {
        let result = normalize_event(ScoreMatrix::new(), 0, FetchStatus::MissingSheet);

        assert!(result.raw.is_empty());
        assert!(result.normalized.is_empty());
        assert!(result.judge_averages.is_empty());
        assert_eq!(result.max, 0.0);
        assert_eq!(result.min, 0.0);
    }

    #[test]
    fn test_event_averages_and_medians() {
        let raw = matrix(&[("Alpha", &[80.0, 90.0]), ("Beta", &[80.0, 90.0])]);

        let result = normalize_event(raw, 2, FetchStatus::Fetched);

        assert_eq!(result.raw_average["Alpha"], 85.0);
        // Identical rows normalize to exactly 100 everywhere.
        assert!((result.normalized_average["Alpha"] - 100.0).abs() < 1e-9);
        assert!((result.normalized_median["Beta"] - 100.0).abs() < 1e-9);
        assert!((result.max - 100.0).abs() < 1e-9);
        assert!((result.min - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_min_over_normalized_averages() {
        let raw = matrix(&[
            ("Alpha", &[90.0, 90.0]),
            ("Beta", &[70.0, 70.0]),
            ("Gamma", &[80.0, 80.0]),
        ]);

        let result = normalize_event(raw, 2, FetchStatus::Fetched);

        assert_eq!(result.max, result.normalized_average["Alpha"]);
        assert_eq!(result.min, result.normalized_average["Beta"]);
        assert!(result.max > result.min);
    }
}
