//! Backend configuration from TOML (`[backend]` section)

use super::issues::{ConfigIssue, ConfigValidationError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Raw generation backend configuration from TOML
///
/// # Example
///
/// ```toml
/// [backend]
/// kind = "ollama"
/// base_url = "http://gpu-box:11434"
/// discover = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Backend implementation; only `"ollama"` is supported
    pub kind: String,
    /// Base URL of the backend server
    pub base_url: String,
    /// Query the backend for installed models at startup
    pub discover: bool,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            kind: "ollama".to_string(),
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            discover: true,
        }
    }
}

impl FileBackendConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !self.kind.eq_ignore_ascii_case("ollama") {
            issues.push(ConfigIssue::error(ConfigValidationError::UnknownBackend(
                self.kind.clone(),
            )));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(ConfigValidationError::InvalidBaseUrl(
                self.base_url.clone(),
            )));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_local_ollama() {
        let config = FileBackendConfig::default();
        assert_eq!(config.kind, "ollama");
        assert_eq!(config.base_url, "http://localhost:11434");
        assert!(config.discover);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_kind_and_bad_url() {
        let config = FileBackendConfig {
            kind: "openai".to_string(),
            base_url: "localhost:11434".to_string(),
            discover: false,
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0].error,
            ConfigValidationError::UnknownBackend(ref k) if k == "openai"
        ));
    }
}
