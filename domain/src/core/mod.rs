//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelMeta`] - catalog metadata for a single model
//! - [`error`] - validation, result-shape and aggregation errors
//! - [`output_format::OutputFormat`] - how a run is reported

pub mod error;
pub mod model;
pub mod output_format;
pub mod string;
