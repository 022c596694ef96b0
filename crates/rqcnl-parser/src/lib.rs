//! rqcnl Parser Layer
//!
//! Pluggable implementations of the `DocumentParser` trait from `rqcnl-domain`.
//!
//! # Architecture
//!
//! The templating engine never talks to a natural-language parser directly.
//! It consumes tokens (text, offset, part-of-speech tag, dependency label,
//! head) and noun chunks through the trait, and this crate supplies the
//! backends.
//!
//! # Parsers
//!
//! - `MockParser`: deterministic, pre-registered documents for testing
//! - `SpacyHttpParser`: a spaCy-compatible parse service over HTTP
//!
//! # Examples
//!
//! ```
//! use rqcnl_domain::{DocumentBuilder, DocumentParser, PosTag};
//! use rqcnl_parser::MockParser;
//!
//! let document = DocumentBuilder::new("Why?")
//!     .token("Why", PosTag::Sconj, "ROOT", 0)
//!     .token("?", PosTag::Punct, "punct", 0)
//!     .build()
//!     .unwrap();
//!
//! let parser = MockParser::new().with_document(document);
//! assert_eq!(parser.parse("Why?").unwrap().len(), 2);
//! ```

#![warn(missing_docs)]

pub mod spacy;

use rqcnl_domain::traits::DocumentParser as DocumentParserTrait;
use rqcnl_domain::ParsedDocument;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use spacy::SpacyHttpParser;

/// Errors that can occur while parsing
#[derive(Error, Debug)]
pub enum ParserError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response decoded but describes an inconsistent document
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Parse service endpoint not found
    #[error("Parse service not available at {0}")]
    ServiceUnavailable(String),

    /// No document registered for the text (mock parser)
    #[error("No parse registered for text: {0:?}")]
    UnknownText(String),

    /// Generic error
    #[error("Parser error: {0}")]
    Other(String),
}

/// Mock parser for deterministic testing
///
/// Returns documents registered ahead of time, keyed by exact text. The empty
/// string always parses to the empty document.
///
/// # Examples
///
/// ```
/// use rqcnl_domain::DocumentParser;
/// use rqcnl_parser::{MockParser, ParserError};
///
/// let mut parser = MockParser::new();
/// parser.add_error("broken question?");
///
/// assert!(parser.parse("").unwrap().is_empty());
/// assert!(matches!(parser.parse("broken question?"), Err(ParserError::Other(_))));
/// assert!(matches!(parser.parse("unseen?"), Err(ParserError::UnknownText(_))));
/// assert_eq!(parser.call_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockParser {
    documents: Arc<Mutex<HashMap<String, ParsedDocument>>>,
    failures: Arc<Mutex<HashSet<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockParser {
    /// Create a parser with no registered documents
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document, keyed by its text (builder style)
    pub fn with_document(mut self, document: ParsedDocument) -> Self {
        self.add_document(document);
        self
    }

    /// Register a document, keyed by its text
    pub fn add_document(&mut self, document: ParsedDocument) {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(document.text().to_string(), document);
    }

    /// Configure to fail for a specific text
    pub fn add_error(&mut self, text: impl Into<String>) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(text.into());
    }

    /// Get the number of times parse was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) = 0;
    }
}

impl DocumentParserTrait for MockParser {
    type Error = ParserError;

    fn parse(&self, text: &str) -> Result<ParsedDocument, Self::Error> {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;

        if self
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(text)
        {
            return Err(ParserError::Other(format!("Mock failure for {:?}", text)));
        }

        if let Some(document) = self
            .documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(text)
        {
            return Ok(document.clone());
        }

        if text.is_empty() {
            return Ok(ParsedDocument::empty(text));
        }

        Err(ParserError::UnknownText(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rqcnl_domain::{DocumentBuilder, PosTag};

    fn why_document() -> ParsedDocument {
        DocumentBuilder::new("Why?")
            .token("Why", PosTag::Sconj, "ROOT", 0)
            .token("?", PosTag::Punct, "punct", 0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_mock_parser_registered_document() {
        let parser = MockParser::new().with_document(why_document());
        let doc = parser.parse("Why?").unwrap();
        assert_eq!(doc, why_document());
    }

    #[test]
    fn test_mock_parser_empty_text() {
        let parser = MockParser::new();
        let doc = parser.parse("").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_mock_parser_unknown_text() {
        let parser = MockParser::new();
        let result = parser.parse("What is this?");
        assert!(matches!(result, Err(ParserError::UnknownText(_))));
    }

    #[test]
    fn test_mock_parser_error_takes_precedence() {
        let mut parser = MockParser::new().with_document(why_document());
        parser.add_error("Why?");
        assert!(parser.parse("Why?").is_err());
    }

    #[test]
    fn test_mock_parser_call_count() {
        let parser = MockParser::new().with_document(why_document());

        assert_eq!(parser.call_count(), 0);

        parser.parse("Why?").unwrap();
        assert_eq!(parser.call_count(), 1);

        let _ = parser.parse("unknown");
        assert_eq!(parser.call_count(), 2);

        parser.reset_call_count();
        assert_eq!(parser.call_count(), 0);
    }

    #[test]
    fn test_mock_parser_clones_share_state() {
        let parser = MockParser::new();
        let mut clone = parser.clone();
        clone.add_document(why_document());
        assert!(parser.parse("Why?").is_ok());
    }
}
