//! Entity-chunk extraction
//!
//! Noun chunks reported by the parser become `EC{n}` placeholders after
//! trimming, prefix protection and rejection. Two heuristics add entities the
//! parser does not chunk: "How + ADJ + VERB" questions, whose adjective is
//! always `EC1`, and a trailing adjective, adverb or copula-led verb right
//! before the final question mark.

use crate::config::Vocabulary;
use crate::error::ChunkerError;
use crate::rewriter::SpanRewriter;
use rqcnl_domain::{ChunkMapping, DocumentParser, ParsedDocument, Placeholder, PosTag, Span};
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// Parse `question` and make sure the parser answered for that exact text
pub(crate) fn parse_question<P>(parser: &P, question: &str) -> Result<ParsedDocument, ChunkerError>
where
    P: DocumentParser,
    P::Error: Display,
{
    let document = parser
        .parse(question)
        .map_err(|e| ChunkerError::Parse(e.to_string()))?;
    if document.text() != question {
        return Err(ChunkerError::Parse(format!(
            "Parser returned a document for different text: {:?}",
            document.text()
        )));
    }
    Ok(document)
}

/// Replaces entity chunks with `EC{n}` placeholders
pub struct EntityExtractor<P> {
    parser: Arc<P>,
    vocabulary: Arc<Vocabulary>,
}

impl<P> EntityExtractor<P>
where
    P: DocumentParser,
    P::Error: Display,
{
    /// Create an extractor over a shared parser and vocabulary
    pub fn new(parser: Arc<P>, vocabulary: Arc<Vocabulary>) -> Self {
        Self { parser, vocabulary }
    }

    /// Template the entity chunks of `question`
    pub fn extract(&self, question: &str) -> Result<String, ChunkerError> {
        self.run(question, None)
    }

    /// Template the entity chunks of `question`, recording each replaced text
    /// in `mapping`
    pub fn extract_with_mapping(
        &self,
        question: &str,
        mapping: &mut ChunkMapping,
    ) -> Result<String, ChunkerError> {
        self.run(question, Some(mapping))
    }

    fn run(&self, question: &str, mut mapping: Option<&mut ChunkMapping>) -> Result<String, ChunkerError> {
        let document = parse_question(self.parser.as_ref(), question)?;
        let tokens = document.tokens();
        let prefix_end = self.vocabulary.prefix().prefix_end(question).unwrap_or(0);
        let mut rewriter = SpanRewriter::new(question);
        let mut counter = 1;

        // How + ADJ + VERB: the adjective is the first entity
        if tokens.len() > 2
            && tokens[0].is_word("how")
            && tokens[1].pos == PosTag::Adj
            && tokens[2].pos == PosTag::Verb
            && tokens[1].start >= prefix_end
        {
            rewriter.mark(&[tokens[1].span()], Placeholder::entity(counter), mapping.as_deref_mut())?;
            counter += 1;
        }

        for chunk in document.noun_chunks() {
            let mut first = chunk.start;
            if chunk.len() > 1 {
                let lead = &tokens[first];
                if lead.lower().starts_with("wh") || lead.is_word("how") {
                    first += 1;
                }
            }
            if first < chunk.end && self.vocabulary.is_leading_trim(&tokens[first].text) {
                first += 1;
            }
            let Some(span) = document.span_of(first, chunk.end) else {
                continue;
            };

            if span.start < prefix_end {
                debug!("Skipping {} inside protected prefix", span);
                continue;
            }
            let Some(text) = rewriter.current_text(span) else {
                continue;
            };
            if text.trim().is_empty() || self.vocabulary.rejects_entity(text) {
                debug!("Rejected entity candidate {:?}", text);
                continue;
            }
            if chunk.start == 0
                && chunk.len() == 1
                && matches!(tokens[0].pos, PosTag::Aux | PosTag::Verb)
            {
                debug!("Skipping leading {:?}", text);
                continue;
            }

            match self.split(text) {
                Some((head, tail)) => {
                    rewriter.mark_split(
                        span,
                        (Placeholder::entity(counter), head),
                        (Placeholder::entity(counter + 1), tail),
                        mapping.as_deref_mut(),
                    )?;
                    counter += 2;
                }
                None => {
                    rewriter.mark(&[span], Placeholder::entity(counter), mapping.as_deref_mut())?;
                    counter += 1;
                }
            }
        }

        if let Some(span) = self.trailing_entity(&document, prefix_end) {
            if rewriter.is_free(span) {
                rewriter.mark(&[span], Placeholder::entity(counter), mapping.as_deref_mut())?;
            }
        }

        Ok(rewriter.render())
    }

    /// Split a candidate around the split phrase into two non-empty parts
    ///
    /// The phrase must stand as whole words. A candidate opening with it
    /// splits after it; otherwise it splits where the phrase begins.
    fn split<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        let phrase = self.vocabulary.split_phrase();
        if text.len() <= phrase.len() {
            return None;
        }
        let lowered = text.to_ascii_lowercase();
        let at = lowered
            .match_indices(phrase)
            .map(|(at, _)| at)
            .find(|&at| {
                let before = lowered[..at].chars().next_back();
                let after = lowered[at + phrase.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
            })?;
        let (head, tail) = if at == 0 {
            let (head, tail) = text.split_at(phrase.len());
            (head, tail.trim_start())
        } else {
            let (head, tail) = text.split_at(at);
            (head.trim_end(), tail)
        };
        (!head.is_empty() && !tail.is_empty()).then_some((head, tail))
    }

    /// Token right before a final "?" that reads as an entity
    fn trailing_entity(&self, document: &ParsedDocument, prefix_end: usize) -> Option<Span> {
        let tokens = document.tokens();
        let [.., penult, last] = tokens else {
            return None;
        };
        if last.text != "?" {
            return None;
        }

        let after_copula = penult.pos == PosTag::Verb
            && tokens.len() >= 3
            && self.vocabulary.is_copula(&tokens[tokens.len() - 3].text);
        if !(after_copula || penult.pos.is_modifier()) {
            return None;
        }
        if self.vocabulary.rejects_entity(&penult.text) || penult.start < prefix_end {
            return None;
        }
        Some(penult.span())
    }
}
