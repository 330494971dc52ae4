//! Run report: one execution plus its aggregation outcome.

use ensemble_domain::{AggregatedResponse, AggregationError, ExecutionResult};
use serde::Serialize;

/// Everything printed at the end of a run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub prompt: String,
    pub execution: ExecutionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregatedResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_error: Option<String>,
}

impl RunReport {
    pub fn new(
        prompt: impl Into<String>,
        execution: ExecutionResult,
        aggregation: Result<AggregatedResponse, AggregationError>,
    ) -> Self {
        let (aggregation, aggregation_error) = match aggregation {
            Ok(report) => (Some(report), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            prompt: prompt.into(),
            execution,
            aggregation,
            aggregation_error,
        }
    }

    /// `true` when aggregation produced a report
    pub fn is_aggregated(&self) -> bool {
        self.aggregation.is_some()
    }
}
