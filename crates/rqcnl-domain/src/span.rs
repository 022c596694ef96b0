//! Text span module

use std::fmt;

/// Half-open byte interval `[start, end)` into a string
///
/// Spans produced by a parser are expressed in the coordinates of the string
/// that was parsed. Ordering is by start, then end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Span {
    /// Create a new span
    ///
    /// # Errors
    /// Returns error if `start > end`
    pub fn new(start: usize, end: usize) -> Result<Self, String> {
        if start > end {
            return Err(format!("Span start {} is after end {}", start, end));
        }
        Ok(Self { start, end })
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span covers nothing
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if `other` lies entirely within this span (equal spans included)
    pub fn contains(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Check if the two spans share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if `offset` falls inside the span
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Slice `text` with this span
    ///
    /// Returns `None` when the span is out of bounds or does not fall on
    /// character boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_creation() {
        let span = Span::new(3, 7).unwrap();
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert!(Span::new(7, 3).is_err());
    }

    #[test]
    fn test_containment() {
        let outer = Span::new(0, 10).unwrap();
        let inner = Span::new(2, 5).unwrap();
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = Span::new(0, 5).unwrap();
        let b = Span::new(5, 8).unwrap();
        let c = Span::new(4, 6).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn test_slice_respects_char_boundaries() {
        let text = "naïve model";
        assert_eq!(Span::new(0, 6).unwrap().slice(text), Some("naïve"));
        assert_eq!(Span::new(0, 3).unwrap().slice(text), None);
        assert_eq!(Span::new(0, 40).unwrap().slice(text), None);
    }
}
