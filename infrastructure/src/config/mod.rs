//! Configuration file loading for model-ensemble
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ENSEMBLE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./ensemble.toml` or `./.ensemble.toml`
//! 4. Global: `~/.config/model-ensemble/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigValidationError, DEFAULT_OLLAMA_URL, FileAggregationConfig,
    FileBackendConfig, FileCatalogConfig, FileConfig, FileExecutionConfig, FileLoggingConfig,
    FileModelEntry, FileOutputConfig, Severity,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
