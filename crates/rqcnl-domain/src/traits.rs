//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the templating engine and
//! infrastructure. Implementations live in other crates.

use crate::document::ParsedDocument;

/// Natural-language parser capability
///
/// Implemented by the infrastructure layer (rqcnl-parser). Implementations
/// must return byte offsets into `text`, tokens in document order, and noun
/// chunks as ascending, non-overlapping token ranges. An empty string parses
/// to an empty document.
pub trait DocumentParser {
    /// Error type for parse operations
    type Error;

    /// Parse `text` into tokens and noun chunks
    fn parse(&self, text: &str) -> Result<ParsedDocument, Self::Error>;
}
