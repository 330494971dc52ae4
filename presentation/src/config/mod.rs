//! Presentation-level configuration
//!
//! Resolves how results are shown from CLI flags layered over the
//! `[output]` section of the config file.

use ensemble_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators while models run
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// CLI flags win over file values; file values win over defaults.
    ///
    /// JSON output never shows progress or color so stdout stays parseable.
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        file_color: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        let json = format == OutputFormat::Json;
        Self {
            format,
            color: file_color && !json,
            show_progress: !quiet && !json,
        }
    }

    /// Apply the color choice to the global `colored` override.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file() {
        let config = OutputConfig::resolve(
            Some(OutputFormat::Full),
            Some(OutputFormat::Best),
            true,
            false,
        );
        assert_eq!(config.format, OutputFormat::Full);
        assert!(config.color);
        assert!(config.show_progress);
    }

    #[test]
    fn test_file_then_default() {
        let config = OutputConfig::resolve(None, Some(OutputFormat::Full), false, false);
        assert_eq!(config.format, OutputFormat::Full);
        assert!(!config.color);

        let config = OutputConfig::resolve(None, None, true, true);
        assert_eq!(config.format, OutputFormat::Best);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_json_is_plain() {
        let config = OutputConfig::resolve(Some(OutputFormat::Json), None, true, false);
        assert!(!config.color);
        assert!(!config.show_progress);
    }
}
