//! Aggregation configuration from TOML (`[aggregation]` section)

use super::issues::{ConfigIssue, ConfigValidationError};
use ensemble_domain::AggregationPolicy;
use serde::{Deserialize, Serialize};

/// Raw aggregation configuration from TOML
///
/// # Example
///
/// ```toml
/// [aggregation]
/// quality_threshold = 0.5
/// similarity_threshold = 0.8
/// top_responses = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAggregationConfig {
    /// Minimum quality score a response needs to be ranked
    pub quality_threshold: f64,
    /// Minimum length similarity for two responses to share a group
    pub similarity_threshold: f64,
    /// Number of responses kept in `top_responses`
    pub top_responses: usize,
}

impl Default for FileAggregationConfig {
    fn default() -> Self {
        let policy = AggregationPolicy::default();
        Self {
            quality_threshold: policy.quality_threshold,
            similarity_threshold: policy.similarity_threshold,
            top_responses: policy.max_top_responses,
        }
    }
}

impl FileAggregationConfig {
    pub fn to_policy(&self) -> AggregationPolicy {
        AggregationPolicy::default()
            .with_quality_threshold(self.quality_threshold)
            .with_similarity_threshold(self.similarity_threshold)
            .with_max_top_responses(self.top_responses)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("aggregation.quality_threshold", self.quality_threshold),
            ("aggregation.similarity_threshold", self.similarity_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(ConfigIssue::error(
                    ConfigValidationError::ThresholdOutOfRange { field, value },
                ));
            }
        }
        if self.top_responses == 0 {
            issues.push(ConfigIssue::warning(ConfigValidationError::ZeroTopResponses));
        }
        issues
    }
}
