//! Reduction of a result list into a single aggregated report.
//!
//! Pipeline:
//!
//! ```text
//! results ─► usable (success && text) ─► scored ─► ≥ threshold ─► sorted desc
//!                                                                 │
//!            best / consensus / top-N / groups / confidence ◄─────┘
//! ```

use super::confidence::confidence;
use super::grouping::{ResponseGroup, group_by_length};
use super::policy::AggregationPolicy;
use super::quality::score_quality;
use crate::core::error::{AggregationError, ResultShapeError};
use crate::core::model::ModelMeta;
use crate::execution::value_objects::ModelResult;
use serde::{Deserialize, Serialize};

/// A result paired with its quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub result: ModelResult,
    pub quality: f64,
}

/// Aggregated view over a set of model results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResponse {
    /// Text of the highest-scoring response. No merging is performed.
    pub consensus: String,
    pub best_response: ModelResult,
    pub best_quality: f64,
    /// Highest-scoring responses that passed the quality threshold, best first
    pub top_responses: Vec<ScoredResult>,
    pub groups: Vec<ResponseGroup>,
    pub confidence: f64,
    /// Successful, non-empty responses before quality filtering
    pub usable_count: usize,
    /// Responses that passed the quality threshold
    pub qualified_count: usize,
}

/// Aggregate `results` under `policy`.
///
/// `lookup` resolves a model id to its catalog entry for the reputation
/// factor; unknown models get the lowest reputation tier.
pub fn aggregate_responses<F>(
    results: &[ModelResult],
    policy: &AggregationPolicy,
    lookup: F,
) -> Result<AggregatedResponse, AggregationError>
where
    F: Fn(&str) -> Option<ModelMeta>,
{
    if results.is_empty() {
        return Err(ResultShapeError::Empty.into());
    }

    let usable: Vec<&ModelResult> = results.iter().filter(|r| r.is_usable()).collect();
    if usable.is_empty() {
        return Err(AggregationError::NoSuccessfulResponses);
    }

    let ranked = rank_by_quality(&usable, policy.quality_threshold, &lookup);
    let Some(best) = ranked
        .iter()
        .reduce(|best, current| if current.quality > best.quality { current } else { best })
        .cloned()
    else {
        return Err(AggregationError::NoQualityResponses {
            threshold: policy.quality_threshold,
        });
    };

    let consensus = naive_consensus(&ranked);

    let ranked_results: Vec<ModelResult> = ranked.iter().map(|s| s.result.clone()).collect();
    let groups = group_by_length(&ranked_results, policy.similarity_threshold);

    let top_responses: Vec<ScoredResult> = ranked
        .iter()
        .take(policy.max_top_responses)
        .cloned()
        .collect();

    let scores: Vec<f64> = ranked.iter().map(|s| s.quality).collect();
    let top_lengths: Vec<usize> = ranked
        .iter()
        .take(policy.agreement_sample)
        .map(|s| s.result.response_chars())
        .collect();
    let confidence = confidence(usable.len(), &scores, &top_lengths);

    Ok(AggregatedResponse {
        consensus,
        best_quality: best.quality,
        best_response: best.result,
        top_responses,
        groups,
        confidence,
        usable_count: usable.len(),
        qualified_count: ranked.len(),
    })
}

/// Score, drop everything below `threshold`, sort best first.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_by_quality<F>(results: &[&ModelResult], threshold: f64, lookup: &F) -> Vec<ScoredResult>
where
    F: Fn(&str) -> Option<ModelMeta>,
{
    let mut ranked: Vec<ScoredResult> = results
        .iter()
        .map(|r| ScoredResult {
            quality: score_quality(r, lookup(&r.model_id).as_ref()),
            result: (*r).clone(),
        })
        .filter(|s| s.quality >= threshold)
        .collect();

    ranked.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    ranked
}

/// Consensus is the top-ranked text; there is no textual merge.
fn naive_consensus(ranked: &[ScoredResult]) -> String {
    match ranked {
        [] => String::new(),
        [only] => only.result.response_text.clone(),
        _ => {
            let mut sorted = ranked.to_vec();
            sorted.sort_by(|a, b| b.quality.total_cmp(&a.quality));
            sorted[0].result.response_text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{GIB, ModelCategory};

    const LONG_TEXT: &str = "Rust guarantees memory safety without a garbage collector. \
        The borrow checker enforces aliasing rules at compile time. \
        Lifetimes describe how long references stay valid.";

    fn catalog(id: &str) -> Option<ModelMeta> {
        match id {
            "coder" => Some(ModelMeta::new("coder").with_category(ModelCategory::Coding)),
            "big" => Some(ModelMeta::new("big").with_size_bytes(8 * GIB)),
            "small" => Some(ModelMeta::new("small").with_size_bytes(GIB)),
            _ => None,
        }
    }

    fn ok(id: &str, text: &str, latency_ms: u64) -> ModelResult {
        ModelResult::success(id, id.to_uppercase(), text, latency_ms)
    }

    #[test]
    fn empty_input_is_a_shape_error() {
        let err = aggregate_responses(&[], &AggregationPolicy::default(), catalog).unwrap_err();
        assert_eq!(err.to_string(), "Results array cannot be empty");
    }

    #[test]
    fn all_failed_input_is_rejected() {
        let results = vec![
            ModelResult::failure("a", "A", "boom", 10),
            ModelResult::timeout("b", "B", 100),
        ];
        let err = aggregate_responses(&results, &AggregationPolicy::default(), catalog)
            .unwrap_err();
        assert_eq!(err, AggregationError::NoSuccessfulResponses);
        assert_eq!(err.to_string(), "No successful responses to aggregate");
    }

    #[test]
    fn success_with_empty_text_is_not_usable() {
        let results = vec![ok("coder", "", 10)];
        let err = aggregate_responses(&results, &AggregationPolicy::default(), catalog)
            .unwrap_err();
        assert_eq!(err, AggregationError::NoSuccessfulResponses);
    }

    #[test]
    fn everything_below_threshold_is_an_explicit_error() {
        // unknown model, slow, short, single sentence: 0.12 + 0.1 + 0.15 + 0.12
        let results = vec![ok("mystery", "meh", 20_000)];
        let err = aggregate_responses(&results, &AggregationPolicy::default(), catalog)
            .unwrap_err();
        assert_eq!(err, AggregationError::NoQualityResponses { threshold: 0.6 });
    }

    #[test]
    fn lower_threshold_admits_weak_responses() {
        let results = vec![ok("mystery", "meh", 20_000)];
        let policy = AggregationPolicy::default().with_quality_threshold(0.0);
        let aggregated = aggregate_responses(&results, &policy, catalog).unwrap();
        assert_eq!(aggregated.consensus, "meh");
        assert_eq!(aggregated.qualified_count, 1);
    }

    #[test]
    fn best_response_skips_empty_text() {
        let results = vec![
            ok("small", "", 100),
            ok("coder", LONG_TEXT, 1_000),
            ok("big", LONG_TEXT, 2_000),
        ];
        let aggregated =
            aggregate_responses(&results, &AggregationPolicy::default(), catalog).unwrap();

        assert!(!aggregated.best_response.response_text.is_empty());
        assert_eq!(aggregated.best_response.model_id, "coder");
        assert_eq!(aggregated.consensus, LONG_TEXT);
        assert_eq!(aggregated.usable_count, 2);
    }

    #[test]
    fn consensus_equals_best_text() {
        let results = vec![
            ok("big", "Short answer. With two sentences that run long enough.", 8_000),
            ok("coder", LONG_TEXT, 100),
        ];
        let aggregated =
            aggregate_responses(&results, &AggregationPolicy::default(), catalog).unwrap();
        assert_eq!(aggregated.consensus, aggregated.best_response.response_text);
        assert_eq!(aggregated.top_responses[0].result, aggregated.best_response);
    }

    #[test]
    fn ties_keep_input_order() {
        let results = vec![ok("coder", LONG_TEXT, 100), {
            let mut twin = ok("coder", LONG_TEXT, 100);
            twin.model_name = "TWIN".to_string();
            twin
        }];
        let aggregated =
            aggregate_responses(&results, &AggregationPolicy::default(), catalog).unwrap();
        assert_eq!(aggregated.best_response.model_name, "CODER");
    }

    #[test]
    fn top_responses_capped_and_sorted() {
        let results: Vec<_> = (0..8)
            .map(|i| ok("big", LONG_TEXT, 1_000 + i * 1_500))
            .collect();
        let aggregated =
            aggregate_responses(&results, &AggregationPolicy::default(), catalog).unwrap();

        assert_eq!(aggregated.top_responses.len(), 5);
        for pair in aggregated.top_responses.windows(2) {
            assert!(pair[0].quality >= pair[1].quality);
        }
    }

    #[test]
    fn similar_lengths_group_together() {
        let a = format!("{}.", "a".repeat(40)) + &format!(" {}.", "b".repeat(37));
        let b = format!("{}.", "c".repeat(44)) + &format!(" {}.", "d".repeat(38));
        assert_eq!(a.len(), 80);
        assert_eq!(b.len(), 85);

        let results = vec![ok("coder", &a, 1_000), ok("coder", &b, 1_000)];
        let aggregated =
            aggregate_responses(&results, &AggregationPolicy::default(), catalog).unwrap();

        assert_eq!(aggregated.groups.len(), 1);
        assert_eq!(aggregated.groups[0].len(), 2);
    }

    #[test]
    fn groups_partition_qualified_results() {
        let results = vec![
            ok("coder", LONG_TEXT, 100),
            ok("big", "Tiny one. Tiny two. Tiny three. Tiny four.", 200),
            ok("small", LONG_TEXT, 300),
            ok("mystery", "x", 30_000),
        ];
        let aggregated =
            aggregate_responses(&results, &AggregationPolicy::default(), catalog).unwrap();

        let grouped: usize = aggregated.groups.iter().map(ResponseGroup::len).sum();
        assert_eq!(grouped, aggregated.qualified_count);
        assert_eq!(aggregated.qualified_count, 3);
    }

    #[test]
    fn confidence_in_unit_interval() {
        let results = vec![
            ok("coder", LONG_TEXT, 100),
            ok("big", "Two sentences here. Quite short ones.", 6_000),
            ok("small", LONG_TEXT, 12_000),
        ];
        let aggregated =
            aggregate_responses(&results, &AggregationPolicy::default(), catalog).unwrap();
        assert!((0.0..=1.0).contains(&aggregated.confidence));
    }

    #[test]
    fn single_response_has_full_agreement() {
        let results = vec![ok("coder", LONG_TEXT, 100)];
        let aggregated =
            aggregate_responses(&results, &AggregationPolicy::default(), catalog).unwrap();
        // 0.3 * 1 + 0.4 * 0.97 + 0.3 * 1
        assert!((aggregated.confidence - 0.988).abs() < 1e-9);
        assert_eq!(aggregated.groups.len(), 1);
    }
}
