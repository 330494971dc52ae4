//! Structured configuration issues
//!
//! Validation never stops at the first problem: every detected issue is
//! reported with a severity so the binary can print warnings and abort only
//! on errors.

use thiserror::Error;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// What is wrong with the configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("execution.timeout_ms cannot be 0")]
    ZeroTimeout,

    #[error("execution.max_concurrency cannot be 0")]
    ZeroConcurrency,

    #[error("{field} must be between 0 and 1 (got {value})")]
    ThresholdOutOfRange { field: &'static str, value: f64 },

    #[error("aggregation.top_responses cannot be 0")]
    ZeroTopResponses,

    #[error("unknown backend kind '{0}' (supported: ollama)")]
    UnknownBackend(String),

    #[error("backend.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("catalog.models[{index}].id cannot be empty")]
    EmptyModelId { index: usize },

    #[error("catalog model '{0}' is listed more than once")]
    DuplicateModelId(String),

    #[error("no catalog models configured and backend discovery is disabled")]
    EmptyCatalog,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub error: ConfigValidationError,
}

impl ConfigIssue {
    pub fn error(error: ConfigValidationError) -> Self {
        Self {
            severity: Severity::Error,
            error,
        }
    }

    pub fn warning(error: ConfigValidationError) -> Self {
        Self {
            severity: Severity::Warning,
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}
