//! Error types for the chunker

use thiserror::Error;

/// Errors that can occur during templating
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Parser failed on the question
    #[error("Parse error: {0}")]
    Parse(String),

    /// Span is empty, out of bounds, or not on character boundaries
    #[error("Invalid span: {0}")]
    InvalidSpan(String),

    /// Span overlaps a substitution already made in this pass
    #[error("Span {0} overlaps an earlier substitution")]
    SpanConflict(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while loading configuration resources
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
