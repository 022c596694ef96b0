//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use rqcnl_chunker::{BatchResult, MarkerFrequency, PatternCount, TemplateFailure, TemplatedQuestion};
use rqcnl_domain::Placeholder;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format one templated question.
    pub fn format_templated(&self, result: &TemplatedQuestion) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.to_record())?),
            OutputFormat::Quiet => Ok(result.template.clone()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Question", result.question.as_str()]);
                builder.push_record(["Template", result.template.as_str()]);
                for (placeholder, text) in result.mapping.iter() {
                    builder.push_record([placeholder.to_string().as_str(), text]);
                }
                Ok(self.finish_table(builder))
            }
        }
    }

    /// Format a batch run with one column per marker.
    pub fn format_batch(&self, result: &BatchResult, markers: &[Placeholder]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let templated: Vec<_> = result.templated.iter().map(TemplatedQuestion::to_record).collect();
                let value = serde_json::json!({
                    "templated": templated,
                    "failures": result.failures,
                    "metadata": result.metadata,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(result
                .templated
                .iter()
                .map(|t| t.template.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if result.templated.is_empty() {
                    return Ok(self.warning("No questions templated."));
                }

                let mut builder = Builder::default();
                let mut header = vec!["Question".to_string(), "Template".to_string()];
                header.extend(markers.iter().map(ToString::to_string));
                builder.push_record(header);

                for templated in &result.templated {
                    let mut row = vec![templated.question.clone(), templated.template.clone()];
                    row.extend(
                        markers
                            .iter()
                            .map(|marker| templated.mapping.get(marker).unwrap_or_default().to_string()),
                    );
                    builder.push_record(row);
                }

                let mut output = self.finish_table(builder);
                output.push('\n');
                output.push_str(&self.batch_summary(result));
                Ok(output)
            }
        }
    }

    /// Format grouped patterns and per-marker chunk frequencies.
    pub fn format_patterns(
        &self,
        total: usize,
        patterns: &[PatternCount],
        frequencies: &[MarkerFrequency],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "total": total,
                    "patterns": patterns,
                    "markers": frequencies,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(patterns
                .iter()
                .map(|p| format!("{}\t{}", p.count, p.pattern))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if patterns.is_empty() {
                    return Ok(self.warning("No patterns found."));
                }

                let mut builder = Builder::default();
                builder.push_record(["Count", "Share", "Pattern", "EC", "PC", "Example"]);
                for pattern in patterns {
                    let share = format!("{:.1}%", pattern.count as f64 * 100.0 / total.max(1) as f64);
                    builder.push_record([
                        pattern.count.to_string(),
                        share,
                        pattern.pattern.clone(),
                        pattern.entities.to_string(),
                        pattern.predicates.to_string(),
                        pattern.example.clone(),
                    ]);
                }
                let mut output = self.finish_table(builder);

                let mut builder = Builder::default();
                builder.push_record(["Marker", "Chunk", "Count"]);
                let mut recurring = 0;
                for frequency in frequencies {
                    for (chunk, count) in &frequency.chunks {
                        builder.push_record([frequency.marker.clone(), chunk.clone(), count.to_string()]);
                        recurring += 1;
                    }
                }
                output.push('\n');
                if recurring == 0 {
                    output.push_str(&self.info("No recurring chunks."));
                } else {
                    output.push_str(&self.finish_table(builder));
                }
                Ok(output)
            }
        }
    }

    /// Format failed questions, one per line.
    pub fn format_failures(&self, failures: &[TemplateFailure]) -> String {
        failures
            .iter()
            .map(|f| self.error(&format!("#{} {:?}: {}", f.index, f.question, f.reason)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Summary line for a batch run.
    pub fn batch_summary(&self, result: &BatchResult) -> String {
        let metadata = &result.metadata;
        let message = format!(
            "Templated {}/{} question(s) in {}ms",
            metadata.succeeded, metadata.total, metadata.processing_time_ms
        );
        if metadata.failed == 0 {
            self.success(&message)
        } else {
            self.warning(&format!("{}, {} failed", message, metadata.failed))
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn finish_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
