//! Predicate-chunk extraction
//!
//! Candidate predicates come from a scan over the part-of-speech sequence.
//! Each maximal run of PART/VERB tokens is accepted in one of three shapes:
//!
//! - [`PredicateShape::VerbGroup`]: the run up to its last VERB
//! - [`PredicateShape::ModifiedPreposition`]: the run, ADJ/ADV tokens, an ADP
//! - [`PredicateShape::Preposition`]: the run directly followed by an ADP
//!
//! Spans inside another candidate are dropped.

use crate::config::Vocabulary;
use crate::entity::parse_question;
use crate::error::ChunkerError;
use crate::rewriter::SpanRewriter;
use rqcnl_domain::{ChunkMapping, DocumentParser, ParsedDocument, Placeholder, PosTag, Span};
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// Acceptance shape of a predicate candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateShape {
    /// `(PART|VERB)* VERB`
    VerbGroup,
    /// `(PART|VERB)+ (ADJ|ADV)+ ADP`
    ModifiedPreposition,
    /// `(PART|VERB)+ ADP`
    Preposition,
}

/// Predicate candidate found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateSpan {
    /// Byte span from the first to the last matched token
    pub span: Span,
    /// Index of the dependency-linked auxiliary, if any
    pub auxiliary: Option<usize>,
    /// Which shape matched
    pub shape: PredicateShape,
}

/// Find predicate candidates in `document`, ordered by position
pub fn predicate_spans(document: &ParsedDocument) -> Vec<PredicateSpan> {
    let tokens = document.tokens();
    let mut matches: Vec<(usize, usize, PredicateShape)> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        if !tokens[i].pos.is_predicate_body() {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < tokens.len() && tokens[i].pos.is_predicate_body() {
            i += 1;
        }
        let run_end = i;

        if let Some(last_verb) = (run_start..run_end).rev().find(|&k| tokens[k].pos == PosTag::Verb) {
            matches.push((run_start, last_verb + 1, PredicateShape::VerbGroup));
        }

        let mut k = run_end;
        while k < tokens.len() && tokens[k].pos.is_modifier() {
            k += 1;
        }
        if k < tokens.len() && tokens[k].pos == PosTag::Adp {
            let shape = if k == run_end {
                PredicateShape::Preposition
            } else {
                PredicateShape::ModifiedPreposition
            };
            matches.push((run_start, k + 1, shape));
        }
    }

    let candidates: Vec<PredicateSpan> = matches
        .into_iter()
        .filter_map(|(start, end, shape)| {
            let span = document.span_of(start, end)?;
            let auxiliary = tokens
                .iter()
                .find(|t| t.has_dep("aux") && (start..end).contains(&t.head) && !(start..end).contains(&t.index))
                .map(|t| t.index);
            Some(PredicateSpan {
                span,
                auxiliary,
                shape,
            })
        })
        .collect();

    let mut kept: Vec<PredicateSpan> = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let covered = candidates.iter().enumerate().any(|(j, other)| {
            i != j && other.span.contains(&candidate.span) && (other.span != candidate.span || j < i)
        });
        if !covered {
            kept.push(candidate.clone());
        }
    }
    kept.sort_by_key(|candidate| candidate.span);
    debug!(
        "{} predicate candidate(s) over [{}]",
        kept.len(),
        document.tag_sequence()
    );
    kept
}

/// Replaces predicate chunks with `PC{n}` placeholders
pub struct PredicateExtractor<P> {
    parser: Arc<P>,
    vocabulary: Arc<Vocabulary>,
}

impl<P> PredicateExtractor<P>
where
    P: DocumentParser,
    P::Error: Display,
{
    /// Create an extractor over a shared parser and vocabulary
    pub fn new(parser: Arc<P>, vocabulary: Arc<Vocabulary>) -> Self {
        Self { parser, vocabulary }
    }

    /// Template the predicate chunks of `question`
    pub fn extract(&self, question: &str) -> Result<String, ChunkerError> {
        self.run(question, None)
    }

    /// Template the predicate chunks of `question`, extending `mapping`
    pub fn extract_with_mapping(
        &self,
        question: &str,
        mapping: &mut ChunkMapping,
    ) -> Result<String, ChunkerError> {
        self.run(question, Some(mapping))
    }

    fn run(&self, question: &str, mut mapping: Option<&mut ChunkMapping>) -> Result<String, ChunkerError> {
        let document = parse_question(self.parser.as_ref(), question)?;
        let prefix_end = self.vocabulary.prefix().prefix_end(question).unwrap_or(0);
        let mut rewriter = SpanRewriter::new(question);
        let mut counter = 1;

        for candidate in predicate_spans(&document) {
            let span = candidate.span;
            if span.start < prefix_end {
                debug!("Skipping {} inside protected prefix", span);
                continue;
            }
            let Some(text) = rewriter.current_text(span) else {
                continue;
            };
            if text.trim().is_empty() || self.vocabulary.rejects_predicate(text) {
                debug!("Rejected predicate candidate {:?}", text);
                continue;
            }

            let auxiliary = candidate
                .auxiliary
                .and_then(|index| document.token(index))
                .filter(|aux| {
                    aux.start >= prefix_end
                        && !self.vocabulary.rejects_auxiliary(&aux.text)
                        && !aux.span().overlaps(&span)
                        && rewriter.is_free(aux.span())
                })
                .map(|aux| aux.span());

            let spans: Vec<Span> = auxiliary.into_iter().chain(std::iter::once(span)).collect();
            rewriter.mark(&spans, Placeholder::predicate(counter), mapping.as_deref_mut())?;
            counter += 1;
        }

        Ok(rewriter.render())
    }
}
