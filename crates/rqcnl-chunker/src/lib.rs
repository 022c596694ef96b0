//! rqcnl Chunker
//!
//! Turns free-text research questions into controlled templates by replacing
//! noun-phrase fragments with `EC{n}` and predicate fragments with `PC{n}`.
//!
//! # Overview
//!
//! Every pass parses its input through a [`DocumentParser`], decides which
//! spans to substitute, and renders the result in one go. The entity pass
//! runs first; the predicate pass parses the entity template again, so
//! placeholders behave like ordinary nouns there.
//!
//! # Architecture
//!
//! ```text
//! Question → Parser → EntityExtractor → Parser → PredicateExtractor → Template
//!                                                                    + Mapping
//! ```
//!
//! # Key Features
//!
//! - **Protected prefixes**: lead-in phrases such as "how can" stay literal
//! - **Auxiliary attachment**: a dependency-linked auxiliary shares the label
//!   of its predicate, even when it is far away in the question
//! - **Configurable vocabulary**: rejection sets and prefix phrases are data
//! - **Batch processing**: sequential or on the rayon pool, order-preserving
//!
//! # Example Usage
//!
//! ```
//! use rqcnl_chunker::{ChunkerConfig, TemplateGenerator};
//! use rqcnl_domain::{DocumentBuilder, PosTag};
//! use rqcnl_parser::MockParser;
//!
//! let question = DocumentBuilder::new("Which animals are endangered?")
//!     .token("Which", PosTag::Det, "det", 1)
//!     .token("animals", PosTag::Noun, "nsubj", 2)
//!     .token("are", PosTag::Aux, "ROOT", 2)
//!     .token("endangered", PosTag::Adj, "acomp", 2)
//!     .token("?", PosTag::Punct, "punct", 2)
//!     .noun_chunk(0, 2)
//!     .build()
//!     .unwrap();
//! let template = DocumentBuilder::new("Which EC1 are EC2?")
//!     .token("Which", PosTag::Det, "det", 1)
//!     .token("EC1", PosTag::Noun, "nsubj", 2)
//!     .token("are", PosTag::Aux, "ROOT", 2)
//!     .token("EC2", PosTag::Noun, "attr", 2)
//!     .token("?", PosTag::Punct, "punct", 2)
//!     .build()
//!     .unwrap();
//!
//! let parser = MockParser::new().with_document(question).with_document(template);
//! let generator = TemplateGenerator::new(parser, &ChunkerConfig::default()).unwrap();
//!
//! let result = generator.template_with_mapping("Which animals are endangered?").unwrap();
//! assert_eq!(result.template, "Which EC1 are EC2?");
//! assert_eq!(result.mapping.render(), "[animals](EC1) ; [endangered](EC2)");
//! ```

#![warn(missing_docs)]

mod config;
mod entity;
mod error;
mod generator;
mod patterns;
mod predicate;
mod prefix;
mod rewriter;
mod types;


pub use config::{
    default_prefix_phrases, load_prefix_patterns, ChunkerConfig, Vocabulary, DEFAULT_SPLIT_PHRASE,
    PATTERN_COLUMN,
};
pub use entity::EntityExtractor;
pub use error::ChunkerError;
pub use generator::TemplateGenerator;
pub use patterns::{
    default_markers, marker_frequencies, normalize_template, MarkerFrequency, PatternCount,
    PatternIndex,
};
pub use predicate::{predicate_spans, PredicateExtractor, PredicateShape, PredicateSpan};
pub use prefix::PrefixDetector;
pub use rewriter::{splice, SpanRewriter};
pub use types::{
    BatchMetadata, BatchResult, MappingEntry, TemplateFailure, TemplateRecord, TemplatedQuestion,
};

pub use rqcnl_domain::DocumentParser;
