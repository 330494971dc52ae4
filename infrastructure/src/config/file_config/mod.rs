//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod aggregation;
mod backend;
mod catalog;
mod execution;
mod issues;
mod logging;
mod output;

pub use aggregation::FileAggregationConfig;
pub use backend::{DEFAULT_OLLAMA_URL, FileBackendConfig};
pub use catalog::{FileCatalogConfig, FileModelEntry};
pub use execution::FileExecutionConfig;
pub use issues::{ConfigIssue, ConfigValidationError, Severity};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;

use ensemble_application::EnsembleConfig;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Fan-out settings
    pub execution: FileExecutionConfig,
    /// Ranking and grouping thresholds
    pub aggregation: FileAggregationConfig,
    /// Generation backend connection
    pub backend: FileBackendConfig,
    /// Statically configured models
    pub catalog: FileCatalogConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.execution.validate());
        issues.extend(self.aggregation.validate());
        issues.extend(self.backend.validate());
        issues.extend(self.catalog.validate());

        if !self.backend.discover && self.catalog.models.is_empty() {
            issues.push(ConfigIssue::warning(ConfigValidationError::EmptyCatalog));
        }

        issues
    }

    /// Build the application-level configuration.
    pub fn to_ensemble_config(&self) -> EnsembleConfig {
        EnsembleConfig::new(self.execution.to_params(), self.aggregation.to_policy())
    }
}
