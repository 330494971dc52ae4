//! Infrastructure layer for model-ensemble
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod ollama;

// Re-export commonly used types
pub use catalog::StaticModelCatalog;
pub use config::{
    ConfigIssue, ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, Severity,
};
pub use logging::JsonlExecutionLogger;
pub use ollama::{OllamaBackend, OllamaCatalogDiscovery, OllamaError};
