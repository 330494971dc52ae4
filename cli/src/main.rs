//! CLI entrypoint for model-ensemble
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use ensemble_application::{
    AggregateResponsesUseCase, ExecuteParallelUseCase, ExecutionLogger, ModelCatalog,
    NoExecutionLogger,
};
use ensemble_domain::{ExecutionRequest, OutputFormat};
use ensemble_infrastructure::{
    ConfigLoader, FileConfig, JsonlExecutionLogger, OllamaBackend, OllamaCatalogDiscovery,
    StaticModelCatalog,
};
use ensemble_presentation::{
    Cli, ConsoleFormatter, OutputConfig, ProgressReporter, RunReport, SimpleProgress,
    StreamPrinter,
};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "model-ensemble.log";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // === Configuration ===
    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let log_dir = cli.log_dir.clone().or_else(|| config.logging.resolved_dir());
    let _log_guard = init_tracing(cli.verbose, log_dir.as_deref())?;

    info!("Starting model-ensemble");

    let mut has_errors = false;
    for issue in config.validate() {
        if issue.is_error() {
            has_errors = true;
        }
        eprintln!("{}", issue.message());
    }
    if has_errors {
        bail!("Invalid configuration");
    }

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        config.output.format,
        config.output.color,
        cli.quiet || !config.output.progress,
    );
    output.apply_color();

    // === Dependency Injection ===
    let catalog = Arc::new(build_catalog(&config).await);

    if cli.list_models {
        println!("{}", ConsoleFormatter::format_models(catalog.all()));
        return Ok(ExitCode::SUCCESS);
    }

    let Some(prompt) = cli.prompt.clone() else {
        bail!("Prompt is required. Use --list-models to see available models.");
    };

    let backend = Arc::new(
        OllamaBackend::new(config.backend.base_url.as_str())
            .context("Failed to create Ollama client")?,
    );

    let logger: Arc<dyn ExecutionLogger> = match (&log_dir, config.logging.run_log) {
        (Some(dir), true) => match JsonlExecutionLogger::in_dir(dir) {
            Some(logger) => {
                info!("Writing run log to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoExecutionLogger),
        },
        _ => Arc::new(NoExecutionLogger),
    };

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let ensemble = config.to_ensemble_config();
    let catalog_port: Arc<dyn ModelCatalog> = catalog.clone();

    let execute = ExecuteParallelUseCase::new(backend, catalog_port.clone())
        .with_params(ensemble.execution().clone())
        .with_logger(logger.clone())
        .with_cancellation(cancel);
    let aggregate = AggregateResponsesUseCase::new(catalog_port)
        .with_policy(ensemble.aggregation().clone())
        .with_logger(logger);

    // === Request ===
    let mut request = ExecutionRequest::new(prompt.clone());
    if !cli.model.is_empty() {
        request = request.with_models(cli.model.iter().cloned());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        request = request.with_timeout_ms(timeout_ms);
    }
    for (key, value) in &cli.options {
        request = request.with_option(key.clone(), value.clone());
    }

    let execution = if cli.stream {
        let printer = StreamPrinter::new();
        execute.execute_stream(&request, &printer).await?
    } else if output.show_progress && std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        execute.execute_with_progress(&request, &progress).await?
    } else if output.show_progress {
        execute.execute_with_progress(&request, &SimpleProgress).await?
    } else {
        execute.execute(&request).await?
    };

    let aggregated = aggregate.execute(&execution.results);
    let all_failed = execution.all_failed();
    let report = RunReport::new(prompt, execution, aggregated);

    let rendered = match output.format {
        OutputFormat::Full => ConsoleFormatter::format(&report),
        OutputFormat::Best => ConsoleFormatter::format_best(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", rendered);

    if all_failed {
        warn!("Every model failed");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }

    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }

    ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
///
/// With a log directory, diagnostics also go to a daily rolling file.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Installed models from the backend merged with the `[catalog]` section.
///
/// Falls back to the configured models when discovery fails.
async fn build_catalog(config: &FileConfig) -> StaticModelCatalog {
    if !config.backend.discover {
        return StaticModelCatalog::from_config(&config.catalog);
    }

    let discovered = match OllamaCatalogDiscovery::new(config.backend.base_url.as_str()) {
        Ok(discovery) => discovery.discover().await,
        Err(e) => Err(e),
    };

    match discovered {
        Ok(models) => {
            info!("Discovered {} installed models", models.len());
            StaticModelCatalog::merged(models, &config.catalog)
        }
        Err(e) => {
            warn!("Model discovery failed, using configured catalog: {}", e);
            StaticModelCatalog::from_config(&config.catalog)
        }
    }
}

fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nCancelling outstanding model calls...");
            cancel.cancel();
        }
    });
}
