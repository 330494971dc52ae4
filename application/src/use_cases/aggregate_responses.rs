//! Aggregate Responses use case
//!
//! Wraps the domain aggregator with catalog lookups, logging and the
//! untyped-input entry point.

use crate::ports::execution_logger::{ExecutionEvent, ExecutionLogger, NoExecutionLogger};
use crate::ports::model_catalog::ModelCatalog;
use ensemble_domain::{
    AggregatedResponse, AggregationError, AggregationPolicy, ModelResult, aggregate_responses,
    parse_results,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for reducing a set of model results to one report
pub struct AggregateResponsesUseCase {
    catalog: Arc<dyn ModelCatalog>,
    policy: AggregationPolicy,
    logger: Arc<dyn ExecutionLogger>,
}

impl AggregateResponsesUseCase {
    pub fn new(catalog: Arc<dyn ModelCatalog>) -> Self {
        Self {
            catalog,
            policy: AggregationPolicy::default(),
            logger: Arc::new(NoExecutionLogger),
        }
    }

    pub fn with_policy(mut self, policy: AggregationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ExecutionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn policy(&self) -> &AggregationPolicy {
        &self.policy
    }

    /// Aggregate typed results.
    pub fn execute(&self, results: &[ModelResult]) -> Result<AggregatedResponse, AggregationError> {
        debug!(
            "Aggregating {} results (quality threshold {})",
            results.len(),
            self.policy.quality_threshold
        );

        let outcome =
            aggregate_responses(results, &self.policy, |id| self.catalog.get(id));

        match &outcome {
            Ok(report) => {
                info!(
                    "Aggregated {} results: best {} (quality {:.2}), {} groups, confidence {:.2}",
                    results.len(),
                    report.best_response.model_id,
                    report.best_quality,
                    report.groups.len(),
                    report.confidence
                );
                self.logger.log(ExecutionEvent::new(
                    "aggregation_completed",
                    json!({
                        "input_count": results.len(),
                        "usable_count": report.usable_count,
                        "qualified_count": report.qualified_count,
                        "best_model": report.best_response.model_id,
                        "best_quality": report.best_quality,
                        "group_count": report.groups.len(),
                        "confidence": report.confidence,
                    }),
                ));
            }
            Err(e) => {
                warn!("Aggregation failed: {}", e);
                self.logger.log(ExecutionEvent::new(
                    "aggregation_failed",
                    json!({
                        "input_count": results.len(),
                        "error": e.to_string(),
                    }),
                ));
            }
        }

        outcome
    }

    /// Aggregate results from untyped JSON, checking their shape first.
    pub fn execute_value(&self, value: &Value) -> Result<AggregatedResponse, AggregationError> {
        let results = parse_results(value)?;
        self.execute(&results)
    }
}
