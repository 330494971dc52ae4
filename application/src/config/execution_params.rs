//! Execution parameters - fan-out control.
//!
//! [`ExecutionParams`] groups the static parameters that control how
//! [`ExecuteParallelUseCase`](crate::use_cases::execute_parallel::ExecuteParallelUseCase)
//! dispatches model calls. These are application-layer concerns, not
//! domain policy.

use ensemble_domain::DEFAULT_TIMEOUT_MS;
use serde::{Deserialize, Serialize};

/// Fan-out control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Per-model timeout used when a request does not carry its own.
    pub default_timeout_ms: u64,
    /// Maximum number of backend calls in flight at once (`None` = one per model).
    ///
    /// A model's timeout starts when it acquires a slot, so every model
    /// still gets the full timeout.
    pub max_concurrency: Option<usize>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            max_concurrency: None,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_default_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.max_concurrency = max.map(|n| n.max(1));
        self
    }
}
