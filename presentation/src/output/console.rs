//! Console output formatter for ensemble results

use super::report::RunReport;
use colored::Colorize;
use ensemble_domain::{AggregatedResponse, ModelMeta, ModelResult, single_line, truncate};

/// Preview width for responses listed under `Top responses`
const PREVIEW_CHARS: usize = 80;

/// Formats ensemble results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every model's response followed by the aggregate report
    pub fn format(report: &RunReport) -> String {
        let mut output = String::new();
        let execution = &report.execution;

        output.push_str(&Self::header("Model Ensemble Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Prompt:".cyan().bold(), report.prompt));

        output.push_str(&format!(
            "{} {}/{} succeeded in {}ms\n",
            "Models:".cyan().bold(),
            execution.success_count,
            execution.total_models,
            execution.total_time_ms
        ));

        output.push_str(&Self::section_header("Responses"));
        for result in &execution.results {
            output.push_str(&Self::format_result(result));
        }

        output.push_str(&Self::section_header("Aggregate"));
        match (&report.aggregation, &report.aggregation_error) {
            (Some(aggregated), _) => output.push_str(&Self::format_aggregate(aggregated)),
            (None, Some(error)) => {
                output.push_str(&format!("\n{} {}\n", "No aggregate:".red().bold(), error));
            }
            (None, None) => {}
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format only the best response (concise output)
    pub fn format_best(report: &RunReport) -> String {
        let Some(aggregated) = &report.aggregation else {
            return format!(
                "{} {}\n",
                "No answer:".red().bold(),
                report
                    .aggregation_error
                    .as_deref()
                    .unwrap_or("no successful responses")
            );
        };

        let best = &aggregated.best_response;
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n\n",
            format!(
                "=== {} (quality {:.2}, confidence {:.0}%) ===",
                best.model_name,
                aggregated.best_quality,
                aggregated.confidence * 100.0
            )
            .cyan()
            .bold()
        ));
        output.push_str(&aggregated.consensus);
        output.push('\n');
        output
    }

    /// Format as JSON
    pub fn format_json(report: &RunReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format catalog entries for `--list-models`
    pub fn format_models(models: &[ModelMeta]) -> String {
        if models.is_empty() {
            return format!("{}\n", "No models known.".yellow());
        }

        let mut output = String::new();
        for model in models {
            let status = if model.is_installed {
                "installed".green()
            } else {
                "missing".red()
            };
            output.push_str(&format!(
                "  {:<32} {:<10} {:>8}  {}\n",
                model.id,
                model.category.as_str(),
                Self::format_size(model.size_bytes),
                status
            ));
        }
        output
    }

    fn format_result(result: &ModelResult) -> String {
        if result.success {
            format!(
                "\n{}\n{}\n",
                format!("── {} ({}ms) ──", result.model_name, result.latency_ms)
                    .yellow()
                    .bold(),
                result.response_text
            )
        } else {
            format!(
                "\n{}\nError: {}\n",
                format!("── {} ({}ms) ──", result.model_name, result.latency_ms)
                    .red()
                    .bold(),
                result.error_message.as_deref().unwrap_or("Unknown")
            )
        }
    }

    fn format_aggregate(aggregated: &AggregatedResponse) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {} (quality {:.2})\n",
            "Best:".green().bold(),
            aggregated.best_response.model_name,
            aggregated.best_quality
        ));
        output.push_str(&format!(
            "{} {:.0}%\n",
            "Confidence:".green().bold(),
            aggregated.confidence * 100.0
        ));
        output.push_str(&format!(
            "{} {} usable, {} above threshold\n",
            "Responses:".green().bold(),
            aggregated.usable_count,
            aggregated.qualified_count
        ));

        output.push_str(&format!("\n{}\n", "Top responses:".cyan().bold()));
        for (rank, scored) in aggregated.top_responses.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {:<24} {:.2}  {}\n",
                rank + 1,
                scored.result.model_name,
                scored.quality,
                truncate(&single_line(&scored.result.response_text), PREVIEW_CHARS)
                    .as_str()
                    .dimmed()
            ));
        }

        output.push_str(&format!("\n{}\n", "Groups:".cyan().bold()));
        for group in &aggregated.groups {
            output.push_str(&format!(
                "  * {} (similarity {:.2})\n",
                group.model_ids().collect::<Vec<_>>().join(", "),
                group.similarity
            ));
        }

        output.push_str(&format!(
            "\n{}\n{}\n",
            "Consensus:".green().bold(),
            aggregated.consensus
        ));
        output
    }

    fn format_size(bytes: u64) -> String {
        if bytes == 0 {
            return "-".to_string();
        }
        format!("{:.1} GiB", bytes as f64 / ensemble_domain::GIB as f64)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_domain::{AggregationError, AggregationPolicy, ExecutionResult, aggregate_responses};

    const ANSWER: &str = "Binary search halves the range each step. It needs sorted input. \
        The running time is logarithmic in the input size.";

    fn report(results: Vec<ModelResult>) -> RunReport {
        let aggregation = aggregate_responses(&results, &AggregationPolicy::default(), |_| None);
        let best = results.iter().find(|r| r.success).cloned();
        RunReport::new("explain", ExecutionResult::new(results, 120, best), aggregation)
    }

    #[test]
    fn test_format_full_lists_every_model() {
        colored::control::set_override(false);
        let report = report(vec![
            ModelResult::success("a", "Model A", ANSWER, 100),
            ModelResult::timeout("b", "Model B", 30_000),
        ]);

        let text = ConsoleFormatter::format(&report);
        assert!(text.contains("Model A"));
        assert!(text.contains("Model B"));
        assert!(text.contains("Error: Timeout"));
        assert!(text.contains("Confidence:"));
        assert!(text.contains("1/2 succeeded"));
    }

    #[test]
    fn test_format_best_shows_consensus() {
        colored::control::set_override(false);
        let report = report(vec![ModelResult::success("a", "Model A", ANSWER, 100)]);

        let text = ConsoleFormatter::format_best(&report);
        assert!(text.contains("Model A"));
        assert!(text.ends_with(&format!("{}\n", ANSWER)));
    }

    #[test]
    fn test_format_best_without_aggregate() {
        colored::control::set_override(false);
        let report = report(vec![ModelResult::failure("a", "Model A", "down", 5)]);

        assert!(!report.is_aggregated());
        let text = ConsoleFormatter::format_best(&report);
        assert!(text.contains(&AggregationError::NoSuccessfulResponses.to_string()));
    }

    #[test]
    fn test_format_json_is_valid() {
        let report = report(vec![ModelResult::success("a", "Model A", ANSWER, 100)]);

        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&report)).unwrap();
        assert_eq!(value["prompt"], "explain");
        assert_eq!(value["execution"]["successCount"], 1);
        assert_eq!(value["aggregation"]["bestResponse"]["modelId"], "a");
        assert!(value.get("aggregationError").is_none());
    }

    #[test]
    fn test_format_models() {
        colored::control::set_override(false);
        let models = vec![
            ModelMeta::new("qwen2.5-coder:7b").with_size_bytes(4 * ensemble_domain::GIB),
            ModelMeta::new("llama3.2:3b").with_installed(false),
        ];

        let text = ConsoleFormatter::format_models(&models);
        assert!(text.contains("qwen2.5-coder:7b"));
        assert!(text.contains("4.0 GiB"));
        assert!(text.contains("missing"));
    }
}
