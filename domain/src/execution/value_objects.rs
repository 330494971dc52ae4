//! Execution value objects - immutable per-call result types.
//!
//! - [`ModelResult`] - one outcome per dispatched model
//! - [`ExecutionResult`] - the full fan-out, in dispatch order

use serde::{Deserialize, Serialize};

/// Error message recorded when a model misses its deadline.
pub const TIMEOUT_MESSAGE: &str = "Timeout";

/// Error message recorded when the caller cancels an execution.
pub const CANCELLED_MESSAGE: &str = "Cancelled";

/// Outcome of a single model call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResult {
    pub model_id: String,
    /// Display name resolved from the catalog at dispatch time
    pub model_name: String,
    #[serde(default)]
    pub response_text: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Wall-clock duration of the call as measured by the orchestrator
    #[serde(default)]
    pub latency_ms: u64,
    /// Completion time (milliseconds since epoch)
    #[serde(default)]
    pub timestamp: u64,
}

impl ModelResult {
    /// Creates a successful result.
    pub fn success(
        model_id: impl Into<String>,
        model_name: impl Into<String>,
        response_text: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            model_name: model_name.into(),
            response_text: response_text.into(),
            success: true,
            error_message: None,
            latency_ms,
            timestamp: current_timestamp(),
        }
    }

    /// Creates a failed result; the response text is always empty.
    pub fn failure(
        model_id: impl Into<String>,
        model_name: impl Into<String>,
        error: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            model_name: model_name.into(),
            response_text: String::new(),
            success: false,
            error_message: Some(error.into()),
            latency_ms,
            timestamp: current_timestamp(),
        }
    }

    /// Creates a timed-out result.
    pub fn timeout(
        model_id: impl Into<String>,
        model_name: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self::failure(model_id, model_name, TIMEOUT_MESSAGE, latency_ms)
    }

    /// Returns `true` if the model answered within its deadline.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns `true` if the model missed its deadline.
    pub fn is_timeout(&self) -> bool {
        self.error_message.as_deref() == Some(TIMEOUT_MESSAGE)
    }

    /// Successful and carrying at least one character of text.
    pub fn is_usable(&self) -> bool {
        self.success && !self.response_text.is_empty()
    }

    /// Response length in characters.
    pub fn response_chars(&self) -> usize {
        self.response_text.chars().count()
    }
}

/// Complete result of one parallel execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// One entry per resolved model, in resolution order
    pub results: Vec<ModelResult>,
    pub total_models: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub total_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_result: Option<ModelResult>,
    /// Text of `best_result`, or empty if nothing succeeded
    pub consensus_text: String,
}

impl ExecutionResult {
    /// Assemble the counters around an already-ordered result list.
    pub fn new(results: Vec<ModelResult>, total_time_ms: u64, best_result: Option<ModelResult>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        let consensus_text = best_result
            .as_ref()
            .map(|r| r.response_text.clone())
            .unwrap_or_default();

        Self {
            total_models: results.len(),
            failure_count: results.len() - success_count,
            success_count,
            results,
            total_time_ms,
            best_result,
            consensus_text,
        }
    }

    /// Returns an iterator over only the successful results.
    pub fn successful_results(&self) -> impl Iterator<Item = &ModelResult> {
        self.results.iter().filter(|r| r.success)
    }

    /// Returns an iterator over only the failed results.
    pub fn failed_results(&self) -> impl Iterator<Item = &ModelResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn all_failed(&self) -> bool {
        self.success_count == 0
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
