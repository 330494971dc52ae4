//! Execution configuration from TOML (`[execution]` section)

use super::issues::{ConfigIssue, ConfigValidationError};
use ensemble_application::ExecutionParams;
use ensemble_domain::DEFAULT_TIMEOUT_MS;
use serde::{Deserialize, Serialize};

/// Raw fan-out configuration from TOML
///
/// # Example
///
/// ```toml
/// [execution]
/// timeout_ms = 60000
/// max_concurrency = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Per-model timeout when the request does not set one
    pub timeout_ms: u64,
    /// Maximum number of models called at once (unbounded when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_concurrency: None,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_default_timeout_ms(self.timeout_ms)
            .with_max_concurrency(self.max_concurrency)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.timeout_ms == 0 {
            issues.push(ConfigIssue::error(ConfigValidationError::ZeroTimeout));
        }
        if self.max_concurrency == Some(0) {
            issues.push(ConfigIssue::warning(ConfigValidationError::ZeroConcurrency));
        }
        issues
    }
}
