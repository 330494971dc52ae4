//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config dir
const APP_DIR: &str = "model-ensemble";

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["ensemble.toml", ".ensemble.toml"];

/// Prefix for environment overrides, e.g. `ENSEMBLE_EXECUTION__TIMEOUT_MS`
pub const ENV_PREFIX: &str = "ENSEMBLE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ENSEMBLE_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./ensemble.toml` or `./.ensemble.toml`
    /// 4. Global: `~/.config/model-ensemble/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path();
        let project = Self::project_config_path();
        Self::load_from(global.as_deref(), project.as_deref(), config_path)
    }

    /// Load from explicit file locations; missing files are skipped.
    pub fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/model-ensemble/config.toml` if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] {}* environment variables", ENV_PREFIX));

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./ensemble.toml or ./.ensemble.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.catalog.models.is_empty());
        assert_eq!(config.execution.timeout_ms, 30_000);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("model-ensemble"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("ensemble.toml");
        fs::write(
            &global,
            "[execution]\ntimeout_ms = 1000\nmax_concurrency = 2\n\n[output]\ncolor = false\n",
        )
        .unwrap();
        fs::write(&project, "[execution]\ntimeout_ms = 2000\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), Some(&project), None).unwrap();

        assert_eq!(config.execution.timeout_ms, 2000);
        // Keys absent from the project file survive from the global one
        assert_eq!(config.execution.max_concurrency, Some(2));
        assert!(!config.output.color);
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("ensemble.toml");
        let explicit = dir.path().join("custom.toml");
        fs::write(&project, "[backend]\nbase_url = \"http://project:11434\"\n").unwrap();
        fs::write(
            &explicit,
            "[backend]\nbase_url = \"http://explicit:11434\"\n\n[[catalog.models]]\nid = \"m\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from(None, Some(&project), Some(&explicit)).unwrap();

        assert_eq!(config.backend.base_url, "http://explicit:11434");
        assert_eq!(config.catalog.models.len(), 1);
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = ConfigLoader::load_from(Some(&missing), None, None).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[execution]\ntimeout_ms = \"soon\"\n").unwrap();

        assert!(ConfigLoader::load_from(None, None, Some(&bad)).is_err());
    }
}
