//! Template pattern analysis
//!
//! Groups templates once placeholder counters are stripped, and counts which
//! chunk texts recur under each placeholder key.

use crate::types::TemplatedQuestion;
use rqcnl_domain::{scan_placeholders, ChunkKind, Placeholder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder keys reported by default: `EC1`..`EC5`, `PC1`..`PC2`
pub fn default_markers() -> Vec<Placeholder> {
    (1..=5)
        .map(Placeholder::entity)
        .chain((1..=2).map(Placeholder::predicate))
        .collect()
}

/// Strip placeholder counters: `What EC1 PC1 EC2?` becomes `What EC PC EC?`
pub fn normalize_template(template: &str) -> String {
    let mut normalized = String::with_capacity(template.len());
    let mut cursor = 0;
    for (span, placeholder) in scan_placeholders(template) {
        normalized.push_str(&template[cursor..span.start]);
        normalized.push_str(placeholder.kind.prefix());
        cursor = span.end;
    }
    normalized.push_str(&template[cursor..]);
    normalized.trim().to_string()
}

/// A normalized pattern and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    /// Template with counters stripped
    pub pattern: String,

    /// Number of templates with this pattern
    pub count: usize,

    /// Number of entity placeholders in the pattern
    pub entities: usize,

    /// Number of predicate placeholders in the pattern
    pub predicates: usize,

    /// First template seen with this pattern
    pub example: String,
}

/// Frequency index over normalized template patterns
#[derive(Debug, Clone, Default)]
pub struct PatternIndex {
    counts: HashMap<String, (usize, String)>,
    total: usize,
}

impl PatternIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `templates`
    pub fn from_templates<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for template in templates {
            index.add(template.as_ref());
        }
        index
    }

    /// Count one template; blank templates are ignored
    pub fn add(&mut self, template: &str) {
        let pattern = normalize_template(template);
        if pattern.is_empty() {
            return;
        }
        self.total += 1;
        self.counts
            .entry(pattern)
            .or_insert_with(|| (0, template.trim().to_string()))
            .0 += 1;
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no template has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of templates counted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Patterns by descending count, ties by pattern text
    pub fn patterns(&self) -> Vec<PatternCount> {
        let mut patterns: Vec<PatternCount> = self
            .counts
            .iter()
            .map(|(pattern, (count, example))| {
                let placeholders = scan_placeholders(example);
                PatternCount {
                    pattern: pattern.clone(),
                    count: *count,
                    entities: placeholders.iter().filter(|(_, p)| p.kind == ChunkKind::Entity).count(),
                    predicates: placeholders
                        .iter()
                        .filter(|(_, p)| p.kind == ChunkKind::Predicate)
                        .count(),
                    example: example.clone(),
                }
            })
            .collect();
        patterns.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pattern.cmp(&b.pattern)));
        patterns
    }
}

/// Recurring chunk texts under one placeholder key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerFrequency {
    /// Placeholder key such as `EC1`
    pub marker: String,

    /// Lower-cased chunk text and count, most frequent first
    pub chunks: Vec<(String, usize)>,
}

/// Count, per marker, the lower-cased chunk texts occurring more than once
pub fn marker_frequencies(results: &[TemplatedQuestion], markers: &[Placeholder]) -> Vec<MarkerFrequency> {
    markers
        .iter()
        .map(|marker| {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for result in results {
                if let Some(text) = result.mapping.get(marker) {
                    let text = text.trim().to_lowercase();
                    if !text.is_empty() {
                        *counts.entry(text).or_insert(0) += 1;
                    }
                }
            }

            let mut chunks: Vec<(String, usize)> =
                counts.into_iter().filter(|(_, count)| *count > 1).collect();
            chunks.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            MarkerFrequency {
                marker: marker.to_string(),
                chunks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rqcnl_domain::ChunkMapping;

    fn templated(template: &str, entries: &[(Placeholder, &str)]) -> TemplatedQuestion {
        let mut mapping = ChunkMapping::new();
        for (placeholder, text) in entries {
            mapping.insert(*placeholder, *text);
        }
        TemplatedQuestion {
            question: String::new(),
            template: template.to_string(),
            mapping,
        }
    }

    #[test]
    fn test_normalize_template() {
        assert_eq!(normalize_template("What EC1 PC1 EC2 PC1?"), "What EC PC EC PC?");
        assert_eq!(normalize_template("  EC12 and EC3 "), "EC and EC");
        assert_eq!(normalize_template("No placeholders"), "No placeholders");
    }

    #[test]
    fn test_default_markers() {
        let markers: Vec<String> = default_markers().iter().map(|m| m.to_string()).collect();
        assert_eq!(markers, vec!["EC1", "EC2", "EC3", "EC4", "EC5", "PC1", "PC2"]);
    }

    #[test]
    fn test_pattern_index_groups_and_sorts() {
        let index = PatternIndex::from_templates([
            "What EC1 PC1 EC2?",
            "What EC1 PC1 EC2?",
            "What EC3 PC2 EC1?",
            "Why EC1?",
            "   ",
        ]);
        assert_eq!(index.total(), 4);
        assert_eq!(index.len(), 2);

        let patterns = index.patterns();
        assert_eq!(patterns[0].pattern, "What EC PC EC?");
        assert_eq!(patterns[0].count, 3);
        assert_eq!(patterns[0].entities, 2);
        assert_eq!(patterns[0].predicates, 1);
        assert_eq!(patterns[0].example, "What EC1 PC1 EC2?");
        assert_eq!(patterns[1].pattern, "Why EC?");
    }

    #[test]
    fn test_marker_frequencies_keep_recurring_chunks() {
        let results = vec![
            templated("EC1 PC1", &[(Placeholder::entity(1), "Weka"), (Placeholder::predicate(1), "require")]),
            templated("EC1 PC1", &[(Placeholder::entity(1), "weka "), (Placeholder::predicate(1), "use")]),
            templated("EC1", &[(Placeholder::entity(1), "NLP")]),
            templated("EC1", &[(Placeholder::entity(1), "nlp")]),
            templated("EC1", &[(Placeholder::entity(1), "NLP")]),
        ];

        let frequencies = marker_frequencies(&results, &default_markers());
        assert_eq!(frequencies.len(), 7);
        assert_eq!(frequencies[0].marker, "EC1");
        assert_eq!(
            frequencies[0].chunks,
            vec![("nlp".to_string(), 3), ("weka".to_string(), 2)]
        );
        assert!(frequencies[5].chunks.is_empty());
    }
}
