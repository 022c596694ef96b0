//! Template command implementation.

use crate::cli::TemplateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rqcnl_chunker::{DocumentParser, TemplateGenerator};
use std::fmt::Display;

/// Execute the template command.
pub fn execute_template<P>(
    args: TemplateArgs,
    generator: &TemplateGenerator<P>,
    formatter: &Formatter,
) -> Result<()>
where
    P: DocumentParser,
    P::Error: Display,
{
    let question = args.question.trim();
    if question.is_empty() {
        return Err(CliError::InvalidInput("Question is empty".to_string()));
    }

    let result = generator.template_with_mapping(question)?;
    println!("{}", formatter.format_templated(&result)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::config::OutputFormat;

    fn args(question: &str) -> TemplateArgs {
        TemplateArgs {
            question: question.to_string(),
        }
    }

    #[test]
    fn test_template_known_question() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = execute_template(args("  Which animals are endangered? "), &fixtures::generator(), &formatter);
        assert!(result.is_ok());
    }

    #[test]
    fn test_template_blank_question() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = execute_template(args("   "), &fixtures::generator(), &formatter);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_template_parse_failure() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = execute_template(args("Broken?"), &fixtures::generator(), &formatter);
        assert!(matches!(
            result,
            Err(CliError::Chunker(rqcnl_chunker::ChunkerError::Parse(_)))
        ));
    }
}
