//! Overall confidence of an aggregated answer.
//!
//! `confidence = 0.3 * success_rate + 0.4 * avg_quality + 0.3 * agreement`

/// Success rate over `n` usable responses.
///
/// Kept in its historical form: the denominator only differs from `n` when
/// `n == 0`, so this is 1.0 for any non-empty input and 0.0 otherwise.
pub fn success_rate(n: usize) -> f64 {
    let n = n as f64;
    n / (n + if n == 0.0 { 1.0 } else { 0.0 })
}

/// Mean of the quality scores, 0.0 for no scores.
pub fn average_quality(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Agreement between response lengths: `max(0, 1 - stddev / mean)`.
///
/// Fewer than two samples agree trivially. Uses the population standard
/// deviation.
pub fn length_agreement(lengths: &[usize]) -> f64 {
    if lengths.len() < 2 {
        return 1.0;
    }

    let count = lengths.len() as f64;
    let mean = lengths.iter().map(|&l| l as f64).sum::<f64>() / count;
    if mean == 0.0 {
        return 1.0;
    }

    let variance = lengths
        .iter()
        .map(|&l| {
            let d = l as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / count;
    let coefficient_of_variation = variance.sqrt() / mean;

    (1.0 - coefficient_of_variation).max(0.0)
}

/// Weighted confidence in `[0, 1]`.
pub fn confidence(usable_count: usize, quality_scores: &[f64], top_lengths: &[usize]) -> f64 {
    let score = 0.3 * success_rate(usable_count)
        + 0.4 * average_quality(quality_scores)
        + 0.3 * length_agreement(top_lengths);
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_is_constant_for_non_empty() {
        assert_eq!(success_rate(0), 0.0);
        assert_eq!(success_rate(1), 1.0);
        assert_eq!(success_rate(17), 1.0);
    }

    #[test]
    fn agreement_trivial_cases() {
        assert_eq!(length_agreement(&[]), 1.0);
        assert_eq!(length_agreement(&[42]), 1.0);
        assert_eq!(length_agreement(&[50, 50, 50]), 1.0);
    }

    #[test]
    fn agreement_uses_population_stddev() {
        // mean 100, population stddev 50 -> cv 0.5
        let agreement = length_agreement(&[50, 150]);
        assert!((agreement - 0.5).abs() < 1e-12);
    }

    #[test]
    fn agreement_floors_at_zero() {
        assert_eq!(length_agreement(&[1, 1, 1000]), 0.0);
    }

    #[test]
    fn confidence_stays_in_unit_interval() {
        let cases: &[(usize, &[f64], &[usize])] = &[
            (1, &[1.0], &[10]),
            (3, &[0.6, 0.7, 0.97], &[10, 2000, 5]),
            (2, &[0.43, 0.43], &[1, 1]),
            (5, &[1.0; 5], &[100, 100, 100]),
        ];
        for (n, scores, lengths) in cases {
            let c = confidence(*n, scores, lengths);
            assert!((0.0..=1.0).contains(&c), "out of range: {}", c);
        }
    }

    #[test]
    fn confidence_weights() {
        // 0.3 * 1.0 + 0.4 * 0.8 + 0.3 * 1.0
        let c = confidence(2, &[0.8, 0.8], &[100, 100]);
        assert!((c - 0.92).abs() < 1e-12);
    }
}
