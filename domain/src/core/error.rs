//! Domain error types
//!
//! Three families, matching where they can surface:
//!
//! - [`ValidationError`] - request rejected before any backend call
//! - [`ResultShapeError`] - aggregator input does not look like a result list
//! - [`AggregationError`] - aggregator had nothing usable to summarize

use thiserror::Error;

/// Request validation errors (raised before dispatch)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Prompt is required")]
    MissingPrompt,

    #[error("Prompt cannot be blank")]
    BlankPrompt,

    #[error("timeoutMs must be non-negative, got {0}")]
    NegativeTimeout(i64),

    #[error("modelIds cannot be empty array; omit it to target all installed models")]
    EmptyModelIds,

    #[error("modelIds[{index}] must be a non-empty string")]
    BlankModelId { index: usize },
}

/// Structural errors in a result list handed to the aggregator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResultShapeError {
    #[error("Results array is required")]
    Missing,

    #[error("Results must be an array")]
    NotAnArray,

    #[error("Results array cannot be empty")]
    Empty,

    #[error("Result at index {index} must be an object")]
    NotAnObject { index: usize },

    #[error("Result at index {index} must have a {expected} {field}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Result at index {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },
}

/// Aggregation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    #[error(transparent)]
    Shape(#[from] ResultShapeError),

    #[error("No successful responses to aggregate")]
    NoSuccessfulResponses,

    #[error("No responses met the quality threshold of {threshold}")]
    NoQualityResponses { threshold: f64 },
}
