//! Result types for templating

use rqcnl_domain::ChunkMapping;
use serde::{Deserialize, Serialize};

/// A question with its template and placeholder mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedQuestion {
    /// Question as given
    pub question: String,

    /// Question with EC/PC placeholders
    pub template: String,

    /// Placeholder → replaced text, EC entries before PC entries
    pub mapping: ChunkMapping,
}

impl TemplatedQuestion {
    /// Serializable form of this result
    pub fn to_record(&self) -> TemplateRecord {
        TemplateRecord {
            question: self.question.clone(),
            template: self.template.clone(),
            mapping: self
                .mapping
                .iter()
                .map(|(placeholder, text)| MappingEntry {
                    placeholder: placeholder.to_string(),
                    text: text.to_string(),
                })
                .collect(),
            mapping_text: self.mapping.render(),
        }
    }
}

/// One placeholder and the text it replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Placeholder key such as `EC1`
    pub placeholder: String,

    /// Replaced text
    pub text: String,
}

/// Serializable form of a [`TemplatedQuestion`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Question as given
    pub question: String,

    /// Question with EC/PC placeholders
    pub template: String,

    /// Mapping entries in serialization order
    pub mapping: Vec<MappingEntry>,

    /// Human-readable mapping: `[text](EC1) ; [text](PC1)`
    pub mapping_text: String,
}

/// A question that could not be templated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFailure {
    /// Position of the question in the batch
    pub index: usize,

    /// Question as given
    pub question: String,

    /// Reason for failure
    pub reason: String,
}

/// Metadata about a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    /// Number of questions submitted
    pub total: usize,

    /// Number of questions templated
    pub succeeded: usize,

    /// Number of questions that failed
    pub failed: usize,

    /// Whether the batch ran on the worker pool
    pub parallel: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Result of templating a batch of questions
///
/// Successes and failures each keep input order.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Templated questions
    pub templated: Vec<TemplatedQuestion>,

    /// Questions that failed
    pub failures: Vec<TemplateFailure>,

    /// Metadata about the run
    pub metadata: BatchMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rqcnl_domain::Placeholder;

    #[test]
    fn test_record_keeps_mapping_order() {
        let mut mapping = ChunkMapping::new();
        mapping.insert(Placeholder::predicate(1), "was trained");
        mapping.insert(Placeholder::entity(1), "the dataset");
        let templated = TemplatedQuestion {
            question: "How was the dataset trained?".to_string(),
            template: "How PC1 EC1 PC1?".to_string(),
            mapping,
        };

        let record = templated.to_record();
        assert_eq!(record.mapping[0].placeholder, "EC1");
        assert_eq!(record.mapping[1].text, "was trained");
        assert_eq!(record.mapping_text, "[the dataset](EC1) ; [was trained](PC1)");
    }

    #[test]
    fn test_record_serializes_to_json() {
        let templated = TemplatedQuestion {
            question: "Why?".to_string(),
            template: "Why?".to_string(),
            mapping: ChunkMapping::new(),
        };
        let json = serde_json::to_value(templated.to_record()).unwrap();
        assert_eq!(json["template"], "Why?");
        assert_eq!(json["mapping"].as_array().unwrap().len(), 0);
        assert_eq!(json["mapping_text"], "");
    }
}
