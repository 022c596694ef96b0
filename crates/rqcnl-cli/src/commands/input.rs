//! Question input handling.

use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};

/// Read raw input from the file or stdin named by `args`.
pub fn read_input(args: &InputArgs) -> Result<String> {
    if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(file_path) = &args.file {
        Ok(fs::read_to_string(file_path)?)
    } else {
        Err(CliError::InvalidInput(
            "Must specify either --file or --stdin".to_string(),
        ))
    }
}

/// Split input into questions: one per line, trimmed, blanks dropped,
/// duplicates removed keeping the first occurrence.
pub fn collect_questions(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}
