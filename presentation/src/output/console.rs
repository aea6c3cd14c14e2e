//! Console output formatter for aggregation results

use colored::Colorize;
use omni_domain::{AggregationResult, OutputFormat};

/// Formats aggregation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `result` in the requested format
    pub fn render(result: &AggregationResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Summary => Self::format_summary_only(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Enable or disable ANSI colors for everything formatted afterwards
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the complete result
    pub fn format(result: &AggregationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Omni AI Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            result.question
        ));

        output.push_str(&Self::section_header("Responses"));
        if result.outcomes.is_empty() {
            output.push_str(&format!("\n{}\n", "No providers configured.".dimmed()));
        }
        for outcome in &result.outcomes {
            let elapsed = format!("({}ms)", outcome.elapsed.as_millis()).dimmed();
            match &outcome.result {
                Ok(text) => output.push_str(&format!(
                    "\n{} {}\n{}\n",
                    format!("── {} ──", outcome.label).yellow().bold(),
                    elapsed,
                    text
                )),
                Err(error) => output.push_str(&format!(
                    "\n{} {}\n{}\n",
                    format!("── {} ──", outcome.label).red().bold(),
                    elapsed,
                    error
                )),
            }
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!("\n{}\n", result.summary));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON (same payload as the HTTP API)
    pub fn format_json(result: &AggregationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the summary only (concise output)
    pub fn format_summary_only(result: &AggregationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), result.question));

        let labels: Vec<_> = result.responses.labels().collect();
        output.push_str(&format!(
            "{} {}\n\n",
            "Providers consulted:".dimmed(),
            labels.join(", ")
        ));

        output.push_str(&result.summary);
        output.push('\n');

        output
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
