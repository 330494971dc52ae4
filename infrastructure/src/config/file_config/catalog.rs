//! Model catalog configuration from TOML (`[[catalog.models]]` entries)

use super::issues::{ConfigIssue, ConfigValidationError};
use ensemble_domain::{ModelCategory, ModelMeta};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One configured model
///
/// # Example
///
/// ```toml
/// [[catalog.models]]
/// id = "qwen2.5-coder:7b"
/// display_name = "Qwen 2.5 Coder"
/// size_bytes = 4683087332
/// category = "coding"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileModelEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub category: ModelCategory,
    #[serde(default = "default_installed")]
    pub installed: bool,
}

fn default_installed() -> bool {
    true
}

impl FileModelEntry {
    pub fn to_meta(&self) -> ModelMeta {
        let meta = ModelMeta::new(self.id.trim())
            .with_size_bytes(self.size_bytes)
            .with_category(self.category.clone())
            .with_installed(self.installed);
        match &self.display_name {
            Some(name) => meta.with_display_name(name),
            None => meta,
        }
    }
}

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    pub models: Vec<FileModelEntry>,
}

impl FileCatalogConfig {
    /// Configured models as catalog entries, skipping blank ids.
    pub fn to_models(&self) -> Vec<ModelMeta> {
        self.models
            .iter()
            .filter(|m| !m.id.trim().is_empty())
            .map(FileModelEntry::to_meta)
            .collect()
    }

    /// Look up a configured entry by id.
    pub fn entry(&self, id: &str) -> Option<&FileModelEntry> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        for (index, entry) in self.models.iter().enumerate() {
            if entry.id.trim().is_empty() {
                issues.push(ConfigIssue::error(ConfigValidationError::EmptyModelId {
                    index,
                }));
            } else if !seen.insert(entry.id.as_str()) {
                issues.push(ConfigIssue::warning(
                    ConfigValidationError::DuplicateModelId(entry.id.clone()),
                ));
            }
        }
        issues
    }
}
