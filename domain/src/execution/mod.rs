//! Execution subdomain: what goes into a fan-out and what comes out.
//!
//! - [`request::ExecutionRequest`] - prompt, target models, timeout, options
//! - [`validation`] - precondition checks run before any backend call
//! - [`value_objects`] - [`ModelResult`](value_objects::ModelResult) and
//!   [`ExecutionResult`](value_objects::ExecutionResult)
//! - [`stream::StreamEvent`] - chunks delivered by streaming backends

pub mod request;
pub mod stream;
pub mod validation;
pub mod value_objects;
