//! Parsed document module
//!
//! A [`ParsedDocument`] is the contract the templating engine consumes from an
//! external parser: ordered tokens plus ordered noun-phrase chunks over them.

use crate::span::Span;
use crate::token::{PosTag, Token};

/// Noun-phrase chunk as a half-open token range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounChunk {
    /// Index of the first token
    pub start: usize,
    /// Index one past the last token
    pub end: usize,
}

impl NounChunk {
    /// Number of tokens in the chunk
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the chunk has no tokens
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of one parser call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    text: String,
    tokens: Vec<Token>,
    noun_chunks: Vec<NounChunk>,
}

impl ParsedDocument {
    /// Create a validated document
    ///
    /// # Errors
    /// Returns error if token indices, heads, offsets or noun chunks are
    /// inconsistent with each other or with `text`
    pub fn new(
        text: impl Into<String>,
        tokens: Vec<Token>,
        noun_chunks: Vec<NounChunk>,
    ) -> Result<Self, String> {
        let text = text.into();

        let mut previous_end = 0;
        for (i, token) in tokens.iter().enumerate() {
            if token.index != i {
                return Err(format!("Token {} carries index {}", i, token.index));
            }
            if token.head >= tokens.len() {
                return Err(format!(
                    "Token {} has head {} outside the document",
                    i, token.head
                ));
            }
            if token.start < previous_end {
                return Err(format!("Token {} overlaps the previous token", i));
            }
            match token.span().slice(&text) {
                Some(slice) if slice == token.text => {}
                _ => {
                    return Err(format!(
                        "Token {} ('{}') does not match the text at {}",
                        i,
                        token.text,
                        token.span()
                    ))
                }
            }
            previous_end = token.end();
        }

        let mut previous_chunk_end = 0;
        for chunk in &noun_chunks {
            if chunk.is_empty() || chunk.end > tokens.len() {
                return Err(format!(
                    "Noun chunk {}..{} is empty or outside the document",
                    chunk.start, chunk.end
                ));
            }
            if chunk.start < previous_chunk_end {
                return Err(format!(
                    "Noun chunk {}..{} overlaps or precedes the previous chunk",
                    chunk.start, chunk.end
                ));
            }
            previous_chunk_end = chunk.end;
        }

        Ok(Self {
            text,
            tokens,
            noun_chunks,
        })
    }

    /// Document with no tokens (what an empty string parses to)
    pub fn empty(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: Vec::new(),
            noun_chunks: Vec::new(),
        }
    }

    /// The parsed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All tokens in document order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at position `index`
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the document has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Noun-phrase chunks in document order
    pub fn noun_chunks(&self) -> &[NounChunk] {
        &self.noun_chunks
    }

    /// Tokens of a token range
    pub fn slice(&self, start: usize, end: usize) -> &[Token] {
        let end = end.min(self.tokens.len());
        let start = start.min(end);
        &self.tokens[start..end]
    }

    /// Span from the first token of `[start, end)` to the last one
    pub fn span_of(&self, start: usize, end: usize) -> Option<Span> {
        let tokens = self.slice(start, end);
        let first = tokens.first()?;
        let last = tokens.last()?;
        Some(Span {
            start: first.start,
            end: last.end(),
        })
    }

    /// Flattened `index::TAG` sequence, handy for diagnostics
    pub fn tag_sequence(&self) -> String {
        self.tokens
            .iter()
            .map(|t| format!("{}::{}", t.index, t.pos))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Incremental builder for [`ParsedDocument`]
///
/// Tokens added with [`DocumentBuilder::token`] are located in the text left
/// to right, so callers only supply surface forms and annotations.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    text: String,
    cursor: usize,
    tokens: Vec<Token>,
    noun_chunks: Vec<NounChunk>,
    error: Option<String>,
}

impl DocumentBuilder {
    /// Start a document over `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
            tokens: Vec::new(),
            noun_chunks: Vec::new(),
            error: None,
        }
    }

    /// Append the next token, locating it after the previous one
    pub fn token(mut self, text: &str, pos: PosTag, dep: &str, head: usize) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.text.get(self.cursor..).and_then(|rest| rest.find(text)) {
            Some(relative) => {
                let start = self.cursor + relative;
                self = self.token_at(text, start, pos, dep, head);
            }
            None => {
                self.error = Some(format!(
                    "Token '{}' not found after offset {}",
                    text, self.cursor
                ));
            }
        }
        self
    }

    /// Append a token at a known byte offset
    pub fn token_at(mut self, text: &str, start: usize, pos: PosTag, dep: &str, head: usize) -> Self {
        let index = self.tokens.len();
        self.tokens.push(Token {
            index,
            text: text.to_string(),
            start,
            pos,
            dep: dep.to_string(),
            head,
        });
        self.cursor = start + text.len();
        self
    }

    /// Append a noun chunk over tokens `[start, end)`
    pub fn noun_chunk(mut self, start: usize, end: usize) -> Self {
        self.noun_chunks.push(NounChunk { start, end });
        self
    }

    /// Validate and build the document
    ///
    /// # Errors
    /// Returns error if a token could not be located or validation fails
    pub fn build(self) -> Result<ParsedDocument, String> {
        if let Some(error) = self.error {
            return Err(error);
        }
        ParsedDocument::new(self.text, self.tokens, self.noun_chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weka_document() -> ParsedDocument {
        DocumentBuilder::new("What system does Weka require?")
            .token("What", PosTag::Det, "det", 1)
            .token("system", PosTag::Noun, "dobj", 4)
            .token("does", PosTag::Aux, "aux", 4)
            .token("Weka", PosTag::Propn, "nsubj", 4)
            .token("require", PosTag::Verb, "ROOT", 4)
            .token("?", PosTag::Punct, "punct", 4)
            .noun_chunk(0, 2)
            .noun_chunk(3, 4)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_locates_offsets() {
        let doc = weka_document();
        assert_eq!(doc.len(), 6);
        assert_eq!(doc.token(2).unwrap().start, 12);
        assert_eq!(doc.token(4).unwrap().span(), Span { start: 22, end: 29 });
        assert_eq!(doc.token(5).unwrap().start, 29);
    }

    #[test]
    fn test_span_of_token_range() {
        let doc = weka_document();
        assert_eq!(doc.span_of(0, 2), Some(Span { start: 0, end: 11 }));
        assert_eq!(doc.span_of(2, 2), None);
    }

    #[test]
    fn test_tag_sequence() {
        let doc = weka_document();
        assert_eq!(
            doc.tag_sequence(),
            "0::DET,1::NOUN,2::AUX,3::PROPN,4::VERB,5::PUNCT"
        );
    }

    #[test]
    fn test_builder_reports_missing_token() {
        let result = DocumentBuilder::new("Is it fast?")
            .token("Is", PosTag::Aux, "ROOT", 0)
            .token("slow", PosTag::Adj, "acomp", 0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_head_outside_document() {
        let result = DocumentBuilder::new("Why?")
            .token("Why", PosTag::Sconj, "ROOT", 3)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_mismatched_token_text() {
        let token = Token {
            index: 0,
            text: "Why".to_string(),
            start: 1,
            pos: PosTag::Sconj,
            dep: "ROOT".to_string(),
            head: 0,
        };
        assert!(ParsedDocument::new("Why?", vec![token], vec![]).is_err());
    }

    #[test]
    fn test_rejects_overlapping_noun_chunks() {
        let result = DocumentBuilder::new("deep neural networks")
            .token("deep", PosTag::Adj, "amod", 2)
            .token("neural", PosTag::Adj, "amod", 2)
            .token("networks", PosTag::Noun, "ROOT", 2)
            .noun_chunk(0, 3)
            .noun_chunk(1, 3)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_document() {
        let doc = ParsedDocument::empty("");
        assert!(doc.is_empty());
        assert!(doc.noun_chunks().is_empty());
        assert_eq!(doc.tag_sequence(), "");
    }
}
