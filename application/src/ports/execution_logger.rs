//! Port for structured run logging.
//!
//! Defines the [`ExecutionLogger`] trait for recording what a fan-out did
//! (targets, per-model outcomes, aggregate report) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! run transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured run event for logging.
pub struct ExecutionEvent {
    /// Event type identifier (e.g., "execution_started", "model_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ExecutionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging run events to a structured log.
///
/// The `log` method is synchronous and non-fallible: logging failures must
/// never disturb an execution.
pub trait ExecutionLogger: Send + Sync {
    /// Record a run event.
    fn log(&self, event: ExecutionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExecutionLogger;

impl ExecutionLogger for NoExecutionLogger {
    fn log(&self, _event: ExecutionEvent) {}
}
