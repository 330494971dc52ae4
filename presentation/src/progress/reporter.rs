//! Progress reporting for parallel execution

use colored::Colorize;
use ensemble_application::ProgressNotifier;
use ensemble_domain::{ExecutionResult, ModelResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during execution with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    /// `v model (123ms)` or `x model (Timeout)`
    fn status_line(result: &ModelResult) -> String {
        if result.success {
            format!(
                "{} {} ({}ms)",
                "v".green(),
                result.model_name,
                result.latency_ms
            )
        } else {
            format!(
                "{} {} ({})",
                "x".red(),
                result.model_name,
                result.error_message.as_deref().unwrap_or("failed")
            )
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_execution_start(&self, total_models: usize) {
        let pb = ProgressBar::new(total_models as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Querying models");
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_model_complete(&self, completed: usize, _total: usize, result: &ModelResult) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::status_line(result));
            pb.set_position(completed as u64);
        }
    }

    fn on_execution_complete(&self, result: &ExecutionResult) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!(
                "{} ({}/{} succeeded)",
                "done".green(),
                result.success_count,
                result.total_models
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_execution_start(&self, total_models: usize) {
        eprintln!(
            "{} {} ({} models)",
            "->".cyan(),
            "Querying models".bold(),
            total_models
        );
    }

    fn on_model_complete(&self, completed: usize, total: usize, result: &ModelResult) {
        eprintln!(
            "  [{}/{}] {}",
            completed,
            total,
            ProgressReporter::status_line(result)
        );
    }

    fn on_execution_complete(&self, _result: &ExecutionResult) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        colored::control::set_override(false);
        let ok = ModelResult::success("a", "Model A", "text", 42);
        assert_eq!(ProgressReporter::status_line(&ok), "v Model A (42ms)");

        let failed = ModelResult::timeout("b", "Model B", 100);
        assert_eq!(ProgressReporter::status_line(&failed), "x Model B (Timeout)");
    }

    #[test]
    fn test_reporter_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_execution_start(2);
        reporter.on_model_complete(1, 2, &ModelResult::success("a", "a", "x", 1));
        reporter.on_model_complete(2, 2, &ModelResult::failure("b", "b", "e", 1));
        let result = ExecutionResult::new(vec![], 5, None);
        reporter.on_execution_complete(&result);
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
