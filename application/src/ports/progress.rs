//! Progress notification port
//!
//! Defines the callbacks fired while a fan-out is running. Callbacks arrive
//! in completion order, not dispatch order.

use ensemble_domain::{ExecutionResult, ModelResult};

/// Callback for progress updates during parallel execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain text, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once, after target models are resolved and before dispatch
    fn on_execution_start(&self, total_models: usize);

    /// Called each time a model settles, success or failure
    fn on_model_complete(&self, completed: usize, total: usize, result: &ModelResult);

    /// Called once with the assembled result
    fn on_execution_complete(&self, _result: &ExecutionResult) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_execution_start(&self, _total_models: usize) {}
    fn on_model_complete(&self, _completed: usize, _total: usize, _result: &ModelResult) {}
}

/// Receiver for streamed output.
///
/// Chunks from different models interleave arbitrarily; consumers must key
/// them by `model_id`.
pub trait StreamObserver: Send + Sync {
    /// Called for each text chunk as soon as it arrives
    fn on_chunk(&self, model_id: &str, chunk: &str);

    /// Called once per model with the accumulated text (or the failure)
    fn on_model_complete(&self, _result: &ModelResult) {}
}
