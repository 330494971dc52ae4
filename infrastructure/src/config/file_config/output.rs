//! `[output]` section: how a run is rendered

use ensemble_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Rendering settings for ensemble runs
///
/// ```toml
/// [output]
/// format = "full"    # full | best | json
/// color = true
/// progress = false   # hide the per-model progress bar
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report layout; the CLI `--output` flag wins when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    pub color: bool,
    /// Show per-model progress while the fan-out runs
    pub progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;
    use super::*;

    #[test]
    fn test_missing_section_keeps_cli_defaults() {
        let config: FileConfig = toml::from_str("[execution]\ntimeout_ms = 5000\n").unwrap();
        assert_eq!(config.output, FileOutputConfig::default());
        assert!(config.output.format.is_none());
        assert!(config.output.progress);
    }

    #[test]
    fn test_best_answer_without_progress() {
        let config: FileConfig = toml::from_str(
            r#"
[output]
format = "best"
progress = false
"#,
        )
        .unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Best));
        assert!(config.output.color);
        assert!(!config.output.progress);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let parsed: Result<FileConfig, _> = toml::from_str("[output]\nformat = \"synthesis\"\n");
        assert!(parsed.is_err());
    }
}
