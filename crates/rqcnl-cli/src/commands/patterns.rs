//! Patterns command implementation.

use crate::cli::PatternsArgs;
use crate::commands::batch::run_batch;
use crate::commands::input::{collect_questions, read_input};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rqcnl_chunker::{
    default_markers, marker_frequencies, DocumentParser, MarkerFrequency, PatternCount, PatternIndex,
    TemplateGenerator, TemplatedQuestion,
};
use std::fmt::Display;

/// Pattern groups and recurring chunks over a set of templated questions.
#[derive(Debug, Clone)]
pub struct PatternReport {
    /// Number of templates counted
    pub total: usize,

    /// Most frequent patterns first
    pub patterns: Vec<PatternCount>,

    /// Recurring chunk texts per default marker
    pub frequencies: Vec<MarkerFrequency>,
}

impl PatternReport {
    /// Analyze `results`, keeping at most `limit` patterns.
    pub fn build(results: &[TemplatedQuestion], limit: usize) -> Self {
        let index = PatternIndex::from_templates(results.iter().map(|r| r.template.as_str()));
        let mut patterns = index.patterns();
        patterns.truncate(limit);

        Self {
            total: index.total(),
            patterns,
            frequencies: marker_frequencies(results, &default_markers()),
        }
    }
}

/// Execute the patterns command.
pub fn execute_patterns<P>(
    args: PatternsArgs,
    generator: &TemplateGenerator<P>,
    formatter: &Formatter,
) -> Result<()>
where
    P: DocumentParser + Send + Sync,
    P::Error: Display,
{
    let questions = collect_questions(&read_input(&args.input)?);
    if questions.is_empty() {
        return Err(CliError::InvalidInput("No questions provided".to_string()));
    }

    let result = run_batch(generator, &questions, args.input.parallel);
    let report = PatternReport::build(&result.templated, args.limit);
    println!(
        "{}",
        formatter.format_patterns(report.total, &report.patterns, &report.frequencies)?
    );

    if !result.failures.is_empty() && formatter.format() != OutputFormat::Json {
        eprintln!("{}", formatter.format_failures(&result.failures));
    }

    Ok(())
}
