//! Batch command implementation.

use crate::cli::BatchArgs;
use crate::commands::input::{collect_questions, read_input};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rqcnl_chunker::{default_markers, BatchResult, DocumentParser, TemplateGenerator};
use std::fmt::Display;

/// Execute the batch command.
pub fn execute_batch<P>(
    args: BatchArgs,
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
    println!("{}", formatter.format_batch(&result, &default_markers())?);

    // JSON output already carries the failures
    if !result.failures.is_empty() && formatter.format() != OutputFormat::Json {
        eprintln!("{}", formatter.format_failures(&result.failures));
    }

    Ok(())
}

/// Template `questions`, shortest templates first.
///
/// Templates of equal length keep input order.
pub fn run_batch<P>(generator: &TemplateGenerator<P>, questions: &[String], parallel: bool) -> BatchResult
where
    P: DocumentParser + Send + Sync,
    P::Error: Display,
{
    let mut result = if parallel {
        generator.generate_batch_parallel(questions)
    } else {
        generator.generate_batch(questions)
    };
    result.templated.sort_by_key(|t| t.template.chars().count());
    result
}
