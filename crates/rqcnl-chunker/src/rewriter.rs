//! Span rewriting
//!
//! [`SpanRewriter`] collects `(span, placeholder)` edits in the coordinates of
//! the parsed string and renders the template in one pass. Every candidate
//! check reads the untouched original text, so no running offset is needed.
//!
//! [`splice`] is the incremental form: it rewrites a partially rewritten
//! string in place and threads the running offset through successive calls.

use crate::error::ChunkerError;
use rqcnl_domain::{ChunkMapping, Placeholder, Span};
use std::collections::BTreeMap;
use tracing::debug;

/// Accumulates placeholder substitutions over one string
#[derive(Debug, Clone)]
pub struct SpanRewriter<'a> {
    text: &'a str,
    edits: BTreeMap<usize, (Span, String)>,
}

impl<'a> SpanRewriter<'a> {
    /// Start rewriting `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            edits: BTreeMap::new(),
        }
    }

    /// Original text
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of substituted spans
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Check if nothing has been substituted yet
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Check that `span` does not touch any substitution made so far
    pub fn is_free(&self, span: Span) -> bool {
        // Edits never overlap, so only the nearest edit on each side matters
        let before = self.edits.range(..span.end).next_back();
        let after = self.edits.range(span.start..).next();
        before.map_or(true, |(_, (edit, _))| !edit.overlaps(&span))
            && after.map_or(true, |(_, (edit, _))| !edit.overlaps(&span))
    }

    /// Text currently occupying `span`
    ///
    /// Returns `None` if the span is out of bounds, not on character
    /// boundaries, or already (partly) substituted.
    pub fn current_text(&self, span: Span) -> Option<&'a str> {
        if !self.is_free(span) {
            return None;
        }
        span.slice(self.text)
    }

    /// Substitute every span in `spans` with the same `placeholder`
    ///
    /// All spans are validated before any is recorded, so a rejected call
    /// leaves the rewriter untouched. When several spans share the label the
    /// mapping keeps the text of the last one.
    pub fn mark(
        &mut self,
        spans: &[Span],
        placeholder: Placeholder,
        mapping: Option<&mut ChunkMapping>,
    ) -> Result<(), ChunkerError> {
        let mut texts = Vec::with_capacity(spans.len());
        for (i, span) in spans.iter().enumerate() {
            texts.push(self.checked_slice(*span)?);
            if spans[..i].iter().any(|earlier| earlier.overlaps(span)) {
                return Err(ChunkerError::SpanConflict(span.to_string()));
            }
        }

        let replacement = placeholder.to_string();
        for span in spans {
            debug!("{} -> {}", span, replacement);
            self.edits.insert(span.start, (*span, replacement.clone()));
        }
        if let (Some(mapping), Some(text)) = (mapping, texts.last()) {
            mapping.insert(placeholder, *text);
        }
        Ok(())
    }

    /// Substitute `span` with two adjacent placeholders separated by a space
    ///
    /// `first_text` and `second_text` are what the mapping records for each
    /// placeholder.
    pub fn mark_split(
        &mut self,
        span: Span,
        first: (Placeholder, &str),
        second: (Placeholder, &str),
        mapping: Option<&mut ChunkMapping>,
    ) -> Result<(), ChunkerError> {
        self.checked_slice(span)?;

        let replacement = format!("{} {}", first.0, second.0);
        debug!("{} -> {}", span, replacement);
        self.edits.insert(span.start, (span, replacement));
        if let Some(mapping) = mapping {
            mapping.insert(first.0, first.1);
            mapping.insert(second.0, second.1);
        }
        Ok(())
    }

    /// Produce the rewritten string
    pub fn render(&self) -> String {
        let mut rendered = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for (span, replacement) in self.edits.values() {
            rendered.push_str(&self.text[cursor..span.start]);
            rendered.push_str(replacement);
            cursor = span.end;
        }
        rendered.push_str(&self.text[cursor..]);
        rendered
    }

    fn checked_slice(&self, span: Span) -> Result<&'a str, ChunkerError> {
        if span.is_empty() {
            return Err(ChunkerError::InvalidSpan(format!("{} is empty", span)));
        }
        let text = span.slice(self.text).ok_or_else(|| {
            ChunkerError::InvalidSpan(format!(
                "{} does not fit a {}-byte string",
                span,
                self.text.len()
            ))
        })?;
        if !self.is_free(span) {
            return Err(ChunkerError::SpanConflict(span.to_string()));
        }
        Ok(text)
    }
}

/// Rewrite `spans` of a partially rewritten string with one placeholder
///
/// Spans are in the coordinates of the string as originally parsed; `offset`
/// is how many bytes earlier substitutions removed (negative when they grew
/// the string). Spans must be ascending and must not overlap each other or any
/// earlier substitution. Returns the new string and the updated offset.
pub fn splice(
    text: &str,
    spans: &[Span],
    placeholder: Placeholder,
    offset: isize,
    mut mapping: Option<&mut ChunkMapping>,
) -> Result<(String, isize), ChunkerError> {
    let replacement = placeholder.to_string();
    let mut current = text.to_string();
    let mut offset = offset;
    let mut previous_end = 0;

    for span in spans {
        if span.is_empty() {
            return Err(ChunkerError::InvalidSpan(format!("{} is empty", span)));
        }
        if span.start < previous_end {
            return Err(ChunkerError::SpanConflict(span.to_string()));
        }
        previous_end = span.end;

        let start = shift(span.start, offset)?;
        let end = shift(span.end, offset)?;
        let original = current.get(start..end).ok_or_else(|| {
            ChunkerError::InvalidSpan(format!(
                "{} shifted by {} does not fit a {}-byte string",
                span,
                offset,
                current.len()
            ))
        })?;

        if let Some(mapping) = mapping.as_deref_mut() {
            mapping.insert(placeholder, original);
        }
        current.replace_range(start..end, &replacement);
        offset += span.len() as isize - replacement.len() as isize;
    }

    Ok((current, offset))
}

fn shift(position: usize, offset: isize) -> Result<usize, ChunkerError> {
    position
        .checked_add_signed(-offset)
        .ok_or_else(|| ChunkerError::InvalidSpan(format!("{} shifted by {}", position, offset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTION: &str = "What system does Weka require?";

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end).unwrap()
    }

    #[test]
    fn test_mark_and_render() {
        let mut rewriter = SpanRewriter::new(QUESTION);
        rewriter.mark(&[span(5, 11)], Placeholder::entity(1), None).unwrap();
        rewriter.mark(&[span(17, 21)], Placeholder::entity(2), None).unwrap();
        assert_eq!(rewriter.render(), "What EC1 does EC2 require?");
        assert_eq!(rewriter.len(), 2);
    }

    #[test]
    fn test_shared_label_records_last_span() {
        let mut rewriter = SpanRewriter::new(QUESTION);
        let mut mapping = ChunkMapping::new();
        rewriter
            .mark(&[span(12, 16), span(22, 29)], Placeholder::predicate(1), Some(&mut mapping))
            .unwrap();
        assert_eq!(rewriter.render(), "What system PC1 Weka PC1?");
        assert_eq!(mapping.get_key("PC1"), Some("require"));
    }

    #[test]
    fn test_edits_render_in_position_order() {
        let mut rewriter = SpanRewriter::new(QUESTION);
        rewriter.mark(&[span(17, 21)], Placeholder::entity(1), None).unwrap();
        rewriter.mark(&[span(5, 11)], Placeholder::entity(2), None).unwrap();
        assert_eq!(rewriter.render(), "What EC2 does EC1 require?");
    }

    #[test]
    fn test_overlap_is_rejected_without_partial_edit() {
        let mut rewriter = SpanRewriter::new(QUESTION);
        rewriter.mark(&[span(5, 11)], Placeholder::entity(1), None).unwrap();

        let result = rewriter.mark(&[span(17, 21), span(8, 16)], Placeholder::entity(2), None);
        assert!(matches!(result, Err(ChunkerError::SpanConflict(_))));
        assert_eq!(rewriter.render(), "What EC1 does Weka require?");
    }

    #[test]
    fn test_overlap_within_one_call_is_rejected() {
        let mut rewriter = SpanRewriter::new(QUESTION);
        let result = rewriter.mark(&[span(5, 11), span(10, 16)], Placeholder::entity(1), None);
        assert!(matches!(result, Err(ChunkerError::SpanConflict(_))));
        assert!(rewriter.is_empty());
    }

    #[test]
    fn test_invalid_spans() {
        let mut rewriter = SpanRewriter::new(QUESTION);
        assert!(matches!(
            rewriter.mark(&[span(3, 3)], Placeholder::entity(1), None),
            Err(ChunkerError::InvalidSpan(_))
        ));
        assert!(matches!(
            rewriter.mark(&[span(25, 40)], Placeholder::entity(1), None),
            Err(ChunkerError::InvalidSpan(_))
        ));

        let mut rewriter = SpanRewriter::new("Café?");
        assert!(matches!(
            rewriter.mark(&[span(0, 4)], Placeholder::entity(1), None),
            Err(ChunkerError::InvalidSpan(_))
        ));
    }

    #[test]
    fn test_is_free_and_current_text() {
        let mut rewriter = SpanRewriter::new(QUESTION);
        rewriter.mark(&[span(12, 16)], Placeholder::predicate(1), None).unwrap();

        assert!(rewriter.is_free(span(5, 11)));
        assert!(rewriter.is_free(span(16, 17)));
        assert!(!rewriter.is_free(span(15, 20)));
        assert!(!rewriter.is_free(span(0, 30)));
        assert_eq!(rewriter.current_text(span(17, 21)), Some("Weka"));
        assert_eq!(rewriter.current_text(span(12, 16)), None);
    }

    #[test]
    fn test_mark_split() {
        let question = "What is the thing learning?";
        let mut rewriter = SpanRewriter::new(question);
        let mut mapping = ChunkMapping::new();
        rewriter
            .mark_split(
                span(8, 26),
                (Placeholder::entity(1), "the thing"),
                (Placeholder::entity(2), "learning"),
                Some(&mut mapping),
            )
            .unwrap();
        assert_eq!(rewriter.render(), "What is EC1 EC2?");
        assert_eq!(mapping.render(), "[the thing](EC1) ; [learning](EC2)");
    }

    #[test]
    fn test_splice_threads_offset() {
        let mut mapping = ChunkMapping::new();
        let (text, offset) =
            splice(QUESTION, &[span(5, 11)], Placeholder::entity(1), 0, Some(&mut mapping)).unwrap();
        assert_eq!(text, "What EC1 does Weka require?");
        assert_eq!(offset, 3);

        let (text, offset) =
            splice(&text, &[span(17, 21)], Placeholder::entity(2), offset, Some(&mut mapping)).unwrap();
        assert_eq!(text, "What EC1 does EC2 require?");
        assert_eq!(offset, 4);
        assert_eq!(mapping.render(), "[system](EC1) ; [Weka](EC2)");
    }

    #[test]
    fn test_splice_negative_offset() {
        let (text, offset) = splice("a b c", &[span(0, 1)], Placeholder::entity(1), 0, None).unwrap();
        assert_eq!(text, "EC1 b c");
        assert_eq!(offset, -2);

        let (text, _) = splice(&text, &[span(4, 5)], Placeholder::entity(2), offset, None).unwrap();
        assert_eq!(text, "EC1 b EC2");
    }

    #[test]
    fn test_splice_rejects_descending_spans() {
        let result = splice(QUESTION, &[span(17, 21), span(5, 11)], Placeholder::entity(1), 0, None);
        assert!(matches!(result, Err(ChunkerError::SpanConflict(_))));
    }

    #[test]
    fn test_splice_rejects_out_of_range() {
        let result = splice("short", &[span(2, 4)], Placeholder::entity(1), 3, None);
        assert!(matches!(result, Err(ChunkerError::InvalidSpan(_))));
    }
}
