//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod execution_logger;
pub mod generation_backend;
pub mod model_catalog;
pub mod progress;
