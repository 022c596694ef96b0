//! Chunk mapping module
//!
//! Records which text each placeholder replaced. One mapping is shared by the
//! entity pass and the predicate pass of a single question.

use crate::placeholder::{scan_placeholders, ChunkKind, Placeholder};
use std::collections::BTreeMap;

/// Ordered placeholder → replaced text correspondence
///
/// Iteration order is every `EC` key by ascending index, then every `PC` key
/// by ascending index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkMapping {
    entries: BTreeMap<Placeholder, String>,
}

impl ChunkMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the text replaced by `placeholder`, returning any previous value
    pub fn insert(&mut self, placeholder: Placeholder, text: impl Into<String>) -> Option<String> {
        self.entries.insert(placeholder, text.into())
    }

    /// Text replaced by `placeholder`
    pub fn get(&self, placeholder: &Placeholder) -> Option<&str> {
        self.entries.get(placeholder).map(String::as_str)
    }

    /// Look up by rendered key such as `"EC1"`
    pub fn get_key(&self, key: &str) -> Option<&str> {
        let placeholder: Placeholder = key.parse().ok()?;
        self.get(&placeholder)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in serialization order
    pub fn iter(&self) -> impl Iterator<Item = (&Placeholder, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Number of entries of one kind
    pub fn count(&self, kind: ChunkKind) -> usize {
        self.entries.keys().filter(|p| p.kind == kind).count()
    }

    /// Human-readable form: `[text](EC1) ; [text](PC1)`
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(placeholder, text)| format!("[{}]({})", text, placeholder))
            .collect::<Vec<_>>()
            .join(" ; ")
    }

    /// Substitute every known placeholder in `template` with its text
    ///
    /// Unknown placeholders are left as they are.
    pub fn restore(&self, template: &str) -> String {
        let mut restored = String::with_capacity(template.len());
        let mut cursor = 0;

        for (span, placeholder) in scan_placeholders(template) {
            if let Some(text) = self.get(&placeholder) {
                restored.push_str(&template[cursor..span.start]);
                restored.push_str(text);
                cursor = span.end;
            }
        }
        restored.push_str(&template[cursor..]);
        restored
    }
}
