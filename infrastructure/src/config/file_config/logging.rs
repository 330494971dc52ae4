//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// dir = "~/.local/state/model-ensemble"
/// run_log = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the rolling diagnostic log and run transcripts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Write a JSONL transcript of every run into `dir`
    pub run_log: bool,
}

impl FileLoggingConfig {
    /// `dir` with a leading `~` expanded to the home directory.
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        if let Ok(rest) = dir.strip_prefix("~")
            && let Some(home) = dirs::home_dir()
        {
            return Some(home.join(rest));
        }
        Some(dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disabled() {
        let config = FileLoggingConfig::default();
        assert!(config.dir.is_none());
        assert!(!config.run_log);
        assert!(config.resolved_dir().is_none());
    }

    #[test]
    fn test_tilde_expansion() {
        let config = FileLoggingConfig {
            dir: Some(PathBuf::from("~/logs")),
            run_log: true,
        };
        let resolved = config.resolved_dir().unwrap();
        if dirs::home_dir().is_some() {
            assert!(!resolved.starts_with("~"));
            assert!(resolved.ends_with("logs"));
        }
    }

    #[test]
    fn test_absolute_dir_unchanged() {
        let config = FileLoggingConfig {
            dir: Some(PathBuf::from("/var/log/ensemble")),
            run_log: false,
        };
        assert_eq!(
            config.resolved_dir(),
            Some(PathBuf::from("/var/log/ensemble"))
        );
    }
}
