//! CLI command definitions

use clap::{Parser, ValueEnum};
use ensemble_domain::OutputFormat as DomainOutputFormat;
use serde_json::Value;
use std::path::PathBuf;

/// Output format for ensemble results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every model's response followed by the aggregate report
    Full,
    /// Only the best response
    Best,
    /// JSON output
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => DomainOutputFormat::Full,
            OutputFormat::Best => DomainOutputFormat::Best,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for model-ensemble
#[derive(Parser, Debug)]
#[command(name = "model-ensemble")]
#[command(author, version, about = "Run one prompt on several local models and pick the best answer")]
#[command(long_about = r#"
Model Ensemble sends a prompt to several locally installed models at once,
waits for all of them, scores every answer and reports the best one together
with a confidence estimate.

Configuration files are loaded from (in priority order):
1. ENSEMBLE_* environment variables (e.g. ENSEMBLE_EXECUTION__TIMEOUT_MS)
2. --config <path>     Explicit config file
3. ./ensemble.toml     Project-level config
4. ~/.config/model-ensemble/config.toml   Global config

Example:
  model-ensemble "Explain Rust lifetimes in two sentences"
  model-ensemble -m llama3.1:8b -m qwen2.5-coder:7b --output full "Write a binary search"
  model-ensemble --stream --option temperature=0.2 "Summarize the CAP theorem"
"#)]
pub struct Cli {
    /// The prompt to send (not required with --list-models / --show-config)
    pub prompt: Option<String>,

    /// Models to run (can be specified multiple times; default: all installed)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Per-model timeout in milliseconds
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub timeout_ms: Option<i64>,

    /// Stream responses as they are generated
    #[arg(long)]
    pub stream: bool,

    /// Output format (default: from config, else "best")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Generation option forwarded to every model (key=value, repeatable)
    #[arg(long = "option", value_name = "KEY=VALUE", value_parser = parse_option)]
    pub options: Vec<(String, Value)>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List known models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Directory for log files (overrides [logging] dir)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Parse `key=value`; the value is read as JSON when it parses, else as a string.
pub fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got '{}'", raw));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("option key cannot be empty in '{}'", raw));
    }
    let value = serde_json::from_str(value.trim())
        .unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
