//! Aggregation policy - tunable thresholds for ranking and grouping.

use serde::{Deserialize, Serialize};

/// Thresholds applied by the response aggregator.
///
/// The defaults reproduce the engine's historical behavior. Note that a
/// minimal-but-valid response can score as low as ~0.43, so the default
/// quality threshold can reject every response; that case surfaces as
/// [`AggregationError::NoQualityResponses`](crate::core::error::AggregationError::NoQualityResponses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationPolicy {
    /// Minimum quality score a response needs to be ranked at all.
    pub quality_threshold: f64,
    /// Length similarity strictly above this admits a response into a group.
    pub similarity_threshold: f64,
    /// Maximum number of entries in `top_responses`.
    pub max_top_responses: usize,
    /// Number of top-ranked responses used to measure agreement.
    pub agreement_sample: usize,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            quality_threshold: 0.6,
            similarity_threshold: 0.7,
            max_top_responses: 5,
            agreement_sample: 3,
        }
    }
}

impl AggregationPolicy {
    // ==================== Builder Methods ====================

    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_max_top_responses(mut self, max: usize) -> Self {
        self.max_top_responses = max;
        self
    }
}
