//! Ensemble configuration container.
//!
//! [`EnsembleConfig`] groups the configuration slices the use cases need.
//! Use cases receive only the slice they consume; the binary holds the full
//! container.

use super::ExecutionParams;
use ensemble_domain::AggregationPolicy;

/// Configuration container built once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnsembleConfig {
    execution: ExecutionParams,
    aggregation: AggregationPolicy,
}

impl EnsembleConfig {
    pub fn new(execution: ExecutionParams, aggregation: AggregationPolicy) -> Self {
        Self {
            execution,
            aggregation,
        }
    }

    // ==================== Accessors ====================

    pub fn execution(&self) -> &ExecutionParams {
        &self.execution
    }

    pub fn aggregation(&self) -> &AggregationPolicy {
        &self.aggregation
    }

    // ==================== Builder Methods ====================

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationPolicy) -> Self {
        self.aggregation = aggregation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slices() {
        let config = EnsembleConfig::default();
        assert_eq!(config.execution().default_timeout_ms, 30_000);
        assert_eq!(config.aggregation().quality_threshold, 0.6);
    }

    #[test]
    fn test_with_slices() {
        let config = EnsembleConfig::default()
            .with_execution(ExecutionParams::default().with_default_timeout_ms(10))
            .with_aggregation(AggregationPolicy::default().with_max_top_responses(2));
        assert_eq!(config.execution().default_timeout_ms, 10);
        assert_eq!(config.aggregation().max_top_responses, 2);
    }
}
