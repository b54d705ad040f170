//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{Result, ResumeRelevanceError};
use crate::output::report::RelevanceReport;
use crate::processing::analyzer::Verdict;
use colored::{Color, Colorize};
use std::collections::BTreeSet;
use std::path::Path;

/// Trait for formatting relevance reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RelevanceReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// Pretty-printed JSON for scripting and integration
pub struct JsonFormatter;

/// Markdown results table followed by a metadata footer
pub struct MarkdownFormatter;

/// Comma-joined skill list, or "None" when empty.
pub fn join_skills(skills: &BTreeSet<String>) -> String {
    if skills.is_empty() {
        "None".to_string()
    } else {
        skills.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn verdict_color(verdict: Verdict) -> Color {
        match verdict {
            Verdict::High => Color::Green,
            Verdict::Medium => Color::Yellow,
            Verdict::Low => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RelevanceReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.colorize("Results", Color::Blue)));
        output.push_str(&format!(
            "{} {}\n",
            self.label("Matched Skills:"),
            self.colorize(&join_skills(&result.matched_skills), Color::Green)
        ));
        output.push_str(&format!(
            "{} {}\n",
            self.label("Missing Skills:"),
            self.colorize(&join_skills(&result.missing_skills), Color::Red)
        ));
        output.push_str(&format!("{} {:.2}\n", self.label("Hard Match Score:"), result.hard_score));
        output.push_str(&format!("{} {:.2}\n", self.label("Semantic Score:"), result.semantic_score));
        output.push_str(&format!("{} {:.2} / 100\n", self.label("Final Score:"), result.final_score));
        output.push_str(&format!(
            "{} {}\n",
            self.label("Verdict:"),
            self.colorize(result.verdict.label(), Self::verdict_color(result.verdict))
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RelevanceReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RelevanceReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Resume Relevance Report\n\n");
        output.push_str("| Field | Value |\n|---|---|\n");
        output.push_str(&format!("| Matched Skills | {} |\n", join_skills(&result.matched_skills)));
        output.push_str(&format!("| Missing Skills | {} |\n", join_skills(&result.missing_skills)));
        output.push_str(&format!("| Hard Match Score | {:.2} |\n", result.hard_score));
        output.push_str(&format!("| Semantic Score | {:.2} |\n", result.semantic_score));
        output.push_str(&format!("| Final Score | {:.2} / 100 |\n", result.final_score));
        output.push_str(&format!("| Verdict | **{}** |\n", result.verdict.label()));

        let meta = &report.metadata;
        output.push_str("\n---\n\n");
        output.push_str(&format!(
            "*Resume:* `{}` | *Job:* `{}` | *Model:* `{}` | *Time:* {}ms | *Generated:* {}\n",
            meta.resume_file,
            meta.job_file,
            meta.embedding_model,
            meta.processing_time_ms,
            meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Report generator that dispatches to the formatter registered for a format
pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors)),
                Box::new(JsonFormatter),
                Box::new(MarkdownFormatter),
            ],
        }
    }

    pub fn generate_report(&self, report: &RelevanceReport, format: &OutputFormat) -> Result<String> {
        self.formatters
            .iter()
            .find(|formatter| formatter.supports_format() == *format)
            .ok_or_else(|| ResumeRelevanceError::OutputFormatting(format!("No formatter for {:?}", format)))?
            .format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content).map_err(|e| {
        ResumeRelevanceError::OutputFormatting(format!(
            "Failed to write report to {}: {}",
            file_path.display(),
            e
        ))
    })
}
