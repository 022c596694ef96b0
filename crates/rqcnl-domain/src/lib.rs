//! rqcnl Domain Layer
//!
//! This crate contains the core vocabulary for templating research questions
//! into a controlled natural language. It has ZERO external dependencies and
//! defines the value objects and trait interfaces that every other layer
//! depends upon.
//!
//! ## Key Concepts
//!
//! - **Token / ParsedDocument**: the contract consumed from an external parser
//!   (text, offsets, part-of-speech tags, dependency edges, noun chunks)
//! - **Span**: a half-open byte interval into a string
//! - **Placeholder**: `EC{n}` (entity chunk) or `PC{n}` (predicate chunk)
//! - **ChunkMapping**: placeholder back to the text it replaced
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Parser implementations live in `rqcnl-parser`
//! - The templating engine lives in `rqcnl-chunker`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod mapping;
pub mod placeholder;
pub mod span;
pub mod token;
pub mod traits;

// Re-exports for convenience
pub use document::{DocumentBuilder, NounChunk, ParsedDocument};
pub use mapping::ChunkMapping;
pub use placeholder::{scan_placeholders, ChunkKind, Placeholder};
pub use span::Span;
pub use token::{PosTag, Token};
pub use traits::DocumentParser;
