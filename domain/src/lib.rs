//! Domain layer for model-ensemble
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Execution
//!
//! An [`ExecutionRequest`] names a prompt and the models it should be sent
//! to. Every dispatched model produces exactly one [`ModelResult`], success
//! or failure, and the whole fan-out is summarized as an [`ExecutionResult`].
//!
//! ## Aggregation
//!
//! Successful results are scored by a quality heuristic, filtered, ranked
//! and grouped by length similarity into an [`AggregatedResponse`] carrying
//! the best answer, a consensus string and a confidence score.

pub mod aggregation;
pub mod core;
pub mod execution;

// Re-export commonly used types
pub use aggregation::{
    aggregator::{AggregatedResponse, ScoredResult, aggregate_responses, rank_by_quality},
    grouping::{ResponseGroup, group_by_length, length_similarity},
    policy::AggregationPolicy,
    quality::{QualityBreakdown, score_quality},
    shape::parse_results,
};
pub use core::{
    error::{AggregationError, ResultShapeError, ValidationError},
    model::{GIB, ModelCategory, ModelMeta},
    output_format::OutputFormat,
    string::{single_line, truncate},
};
pub use execution::{
    request::{DEFAULT_TIMEOUT_MS, ExecutionRequest, GenerationOptions},
    stream::StreamEvent,
    validation::{ValidationWarning, ValidationWarningCode, validate_request},
    value_objects::{CANCELLED_MESSAGE, ExecutionResult, ModelResult, TIMEOUT_MESSAGE},
};
