//! Protected-prefix detection
//!
//! A question that opens with a configured lead-in phrase ("how can",
//! "what does", "is", ...) keeps that phrase literal in its template.

/// Matches configured lead-in phrases against the start of a question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixDetector {
    phrases: Vec<String>,
}

impl PrefixDetector {
    /// Create a detector; phrases are trimmed, lower-cased and de-duplicated,
    /// keeping their first position
    pub fn new(phrases: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let mut normalized: Vec<String> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if !phrase.is_empty() && !normalized.contains(&phrase) {
                normalized.push(phrase);
            }
        }
        Self { phrases: normalized }
    }

    /// Phrases in matching order
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Byte index just past the first matching phrase, if any
    ///
    /// Leading whitespace is skipped and counted in the index. A phrase matches
    /// case-insensitively when it is followed by a non-alphanumeric character
    /// or by the end of the question.
    pub fn prefix_end(&self, question: &str) -> Option<usize> {
        let trimmed = question.trim_start();
        let leading = question.len() - trimmed.len();

        self.phrases.iter().find_map(|phrase| {
            let head = trimmed.get(..phrase.len())?;
            if head.to_lowercase() != *phrase {
                return None;
            }
            let at_boundary = trimmed[phrase.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
            at_boundary.then_some(leading + phrase.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PrefixDetector {
        PrefixDetector::new(["how can", "what does", "is"])
    }

    #[test]
    fn test_matches_two_word_phrase() {
        assert_eq!(detector().prefix_end("How can we reduce latency?"), Some(7));
    }

    #[test]
    fn test_counts_leading_whitespace() {
        assert_eq!(detector().prefix_end("   What does Weka need?"), Some(12));
    }

    #[test]
    fn test_requires_word_boundary() {
        assert_eq!(detector().prefix_end("Isolation forests work?"), None);
        assert_eq!(detector().prefix_end("Is?"), Some(2));
    }

    #[test]
    fn test_exact_full_match() {
        assert_eq!(detector().prefix_end("is"), Some(2));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(detector().prefix_end("Which animals are endangered?"), None);
        assert_eq!(detector().prefix_end(""), None);
    }

    #[test]
    fn test_first_match_wins() {
        let detector = PrefixDetector::new(["is", "is there"]);
        assert_eq!(detector.prefix_end("Is there a limit?"), Some(2));

        let detector = PrefixDetector::new(["is there", "is"]);
        assert_eq!(detector.prefix_end("Is there a limit?"), Some(8));
    }

    #[test]
    fn test_normalizes_and_deduplicates() {
        let detector = PrefixDetector::new([" How Can ", "how can", "", "is"]);
        assert_eq!(detector.phrases(), &["how can".to_string(), "is".to_string()]);
    }

    #[test]
    fn test_multibyte_question_does_not_panic() {
        assert_eq!(detector().prefix_end("Ééé?"), None);
    }
}
