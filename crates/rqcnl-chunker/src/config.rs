//! Configuration for the chunker
//!
//! [`ChunkerConfig`] is plain serializable data. It is compiled once into an
//! immutable [`Vocabulary`] that every extractor shares by reference.

use crate::error::ChunkerError;
use crate::prefix::PrefixDetector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const INTERROGATIVES: [&str; 6] = ["how", "what", "when", "where", "why", "which"];
const HOW_AUXILIARIES: [&str; 9] = [
    "can", "do", "does", "will", "would", "should", "could", "might", "may",
];
const WH_AUXILIARIES: [&str; 5] = ["can", "do", "does", "will", "would"];
const LEADING_AUXILIARIES: [&str; 12] = [
    "is", "are", "was", "were", "do", "does", "did", "can", "could", "will", "would", "should",
];

const BASELINE_ENTITY_REJECTIONS: [&str; 59] = [
    "does", "do", "can", "could", "will", "would", "should", "shall", "may", "might",
    "what", "which", "when", "where", "who", "whom", "whose", "why", "how",
    "type", "types", "kinds", "kind", "category", "categories", "difference",
    "differences", "extent", "i", "we", "respect", "there", "this", "that",
    "these", "those", "not", "the main types", "the possible types", "the types",
    "the difference", "the differences", "the main categories",
    "is", "are", "was", "were", "have", "has", "had", "been", "being", "be",
    "how can", "what can", "when can", "where can", "why can", "which can",
];
const EXTENDED_ENTITY_REJECTIONS: [&str; 7] = [
    "the performance", "the use", "the context", "the accuracy", "terms", "it", "impact",
];

const BASELINE_PREDICATE_REJECTIONS: [&str; 32] = [
    "is", "are", "was", "were", "do", "does", "did", "have", "had", "has",
    "can", "could", "will", "would", "should", "shall", "may", "might",
    "must", "be", "been", "being", "categorise", "regarding",
    "is of", "are of", "are in", "given",
    "is there", "are there", "was there", "were there",
];
const EXTENDED_PREDICATE_REJECTIONS: [&str; 13] = [
    "using", "compared to", "compare to", "affect", "improving", "improve", "based on",
    "incorporating", "impact", "used", "achieve", "identifying", "considering",
];

const DO_SUPPORT: [&str; 3] = ["do", "does", "did"];

const ENTITY_LEADING_TRIMS: [&str; 5] = ["any", "some", "many", "well", "its"];
const COPULAS: [&str; 4] = ["are", "is", "were", "was"];

/// Default phrase that splits one entity chunk into two placeholders
pub const DEFAULT_SPLIT_PHRASE: &str = "the thing";

/// Column holding phrases in a prefix pattern file
pub const PATTERN_COLUMN: &str = "pattern";

/// Configuration for the chunker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Protected lead-in phrases, matched first to last
    pub prefix_phrases: Vec<String>,

    /// Optional comma-separated file with a `pattern` column; its phrases are
    /// matched before `prefix_phrases`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_pattern_file: Option<PathBuf>,

    /// Entity chunk texts that are never substituted
    pub entity_rejections: Vec<String>,

    /// Predicate chunk texts that are never substituted
    pub predicate_rejections: Vec<String>,

    /// Auxiliaries that are never attached to a predicate placeholder
    pub auxiliary_rejections: Vec<String>,

    /// Words trimmed from the front of a noun chunk
    pub entity_leading_trims: Vec<String>,

    /// Copulas that turn a trailing verb into an entity chunk
    pub copulas: Vec<String>,

    /// Phrase that splits an entity chunk into two placeholders
    pub split_phrase: String,
}

impl Default for ChunkerConfig {
    /// Extended rejection sets, including the discourse fillers
    ///
    /// Auxiliaries are screened with the predicate rejection set except for
    /// do-support, so "does" joins its verb while modals stay literal.
    fn default() -> Self {
        let mut config = Self::baseline();
        config
            .entity_rejections
            .extend(to_strings(&EXTENDED_ENTITY_REJECTIONS));
        config
            .predicate_rejections
            .extend(to_strings(&EXTENDED_PREDICATE_REJECTIONS));
        config.auxiliary_rejections = config
            .predicate_rejections
            .iter()
            .filter(|word| !DO_SUPPORT.contains(&word.as_str()))
            .cloned()
            .collect();
        config
    }
}

impl ChunkerConfig {
    /// Baseline preset: the smaller rejection sets without discourse fillers
    ///
    /// Auxiliaries are screened with the predicate rejection set, so modal and
    /// "do" auxiliaries stay literal.
    pub fn baseline() -> Self {
        Self {
            prefix_phrases: default_prefix_phrases(),
            prefix_pattern_file: None,
            entity_rejections: to_strings(&BASELINE_ENTITY_REJECTIONS),
            predicate_rejections: to_strings(&BASELINE_PREDICATE_REJECTIONS),
            auxiliary_rejections: to_strings(&BASELINE_PREDICATE_REJECTIONS),
            entity_leading_trims: to_strings(&ENTITY_LEADING_TRIMS),
            copulas: to_strings(&COPULAS),
            split_phrase: DEFAULT_SPLIT_PHRASE.to_string(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.split_phrase.trim().is_empty() {
            return Err("split_phrase must not be empty".to_string());
        }
        let lists = [
            ("prefix_phrases", &self.prefix_phrases),
            ("entity_rejections", &self.entity_rejections),
            ("predicate_rejections", &self.predicate_rejections),
            ("auxiliary_rejections", &self.auxiliary_rejections),
            ("entity_leading_trims", &self.entity_leading_trims),
            ("copulas", &self.copulas),
        ];
        for (name, list) in lists {
            if let Some(position) = list.iter().position(|entry| entry.trim().is_empty()) {
                return Err(format!("{} has an empty entry at position {}", name, position));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ChunkerError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents).map_err(ChunkerError::Config)
    }
}

/// Built-in interrogative + auxiliary starters, two-word phrases first
pub fn default_prefix_phrases() -> Vec<String> {
    let mut phrases = Vec::new();
    for interrogative in INTERROGATIVES {
        let auxiliaries: &[&str] = if interrogative == "how" {
            &HOW_AUXILIARIES
        } else {
            &WH_AUXILIARIES
        };
        for auxiliary in auxiliaries {
            phrases.push(format!("{} {}", interrogative, auxiliary));
        }
    }
    phrases.extend(to_strings(&LEADING_AUXILIARIES));
    phrases
}

/// Read lead-in phrases from a comma-separated file with a `pattern` column
///
/// Cells may be double-quoted to hold commas, with `""` for a literal quote;
/// a quoted cell cannot span lines. Phrases are trimmed and lower-cased, blank
/// cells are skipped, and a row with more cells than the header is an error.
pub fn load_prefix_patterns(path: impl AsRef<Path>) -> Result<Vec<String>, ChunkerError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let mut lines = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| ChunkerError::Config(format!("{} is empty", path.display())))?;
    let header = split_row(header);
    let column = header
        .iter()
        .position(|cell| cell == PATTERN_COLUMN)
        .ok_or_else(|| {
            ChunkerError::Config(format!(
                "{} has no '{}' column",
                path.display(),
                PATTERN_COLUMN
            ))
        })?;

    let mut patterns = Vec::new();
    for (number, line) in lines {
        let cells = split_row(line);
        if cells.len() > header.len() {
            return Err(ChunkerError::Config(format!(
                "{} line {}: {} cells, header has {}",
                path.display(),
                number + 1,
                cells.len(),
                header.len()
            )));
        }
        if let Some(cell) = cells.into_iter().nth(column) {
            let pattern = cell.to_lowercase();
            if !pattern.is_empty() {
                patterns.push(pattern);
            }
        }
    }

    debug!("Loaded {} prefix patterns from {}", patterns.len(), path.display());
    Ok(patterns)
}

fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => {
                cells.push(cell.trim().to_string());
                cell.clear();
            }
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn to_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|w| w.trim().to_lowercase()).collect()
}

/// Compiled, read-only form of [`ChunkerConfig`]
///
/// Built once and shared between extractors and worker threads.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    prefix: PrefixDetector,
    entity_rejections: HashSet<String>,
    predicate_rejections: HashSet<String>,
    auxiliary_rejections: HashSet<String>,
    entity_leading_trims: HashSet<String>,
    copulas: HashSet<String>,
    split_phrase: String,
}

impl Vocabulary {
    /// Validate `config`, load any prefix pattern file, and compile
    pub fn from_config(config: &ChunkerConfig) -> Result<Self, ChunkerError> {
        config.validate().map_err(ChunkerError::Config)?;

        let mut phrases = match &config.prefix_pattern_file {
            Some(path) => load_prefix_patterns(path)?,
            None => Vec::new(),
        };
        phrases.extend(config.prefix_phrases.iter().cloned());

        Ok(Self::compile(config, phrases))
    }

    fn compile(config: &ChunkerConfig, prefix_phrases: Vec<String>) -> Self {
        Self {
            prefix: PrefixDetector::new(prefix_phrases),
            entity_rejections: to_set(&config.entity_rejections),
            predicate_rejections: to_set(&config.predicate_rejections),
            auxiliary_rejections: to_set(&config.auxiliary_rejections),
            entity_leading_trims: to_set(&config.entity_leading_trims),
            copulas: to_set(&config.copulas),
            split_phrase: config.split_phrase.trim().to_lowercase(),
        }
    }

    /// Protected-prefix detector
    pub fn prefix(&self) -> &PrefixDetector {
        &self.prefix
    }

    /// Check an entity candidate against the rejection set
    pub fn rejects_entity(&self, text: &str) -> bool {
        self.entity_rejections.contains(&text.trim().to_lowercase())
    }

    /// Check a predicate candidate against the rejection set
    pub fn rejects_predicate(&self, text: &str) -> bool {
        self.predicate_rejections.contains(&text.trim().to_lowercase())
    }

    /// Check if an auxiliary must stay out of a predicate placeholder
    pub fn rejects_auxiliary(&self, text: &str) -> bool {
        self.auxiliary_rejections.contains(&text.trim().to_lowercase())
    }

    /// Check if a leading noun-chunk word is trimmed
    pub fn is_leading_trim(&self, word: &str) -> bool {
        self.entity_leading_trims.contains(&word.to_lowercase())
    }

    /// Check if a word is a copula
    pub fn is_copula(&self, word: &str) -> bool {
        self.copulas.contains(&word.to_lowercase())
    }

    /// Lower-cased split phrase
    pub fn split_phrase(&self) -> &str {
        &self.split_phrase
    }

    /// Entity rejection set
    pub fn entity_rejections(&self) -> impl Iterator<Item = &str> {
        self.entity_rejections.iter().map(String::as_str)
    }

    /// Predicate rejection set
    pub fn predicate_rejections(&self) -> impl Iterator<Item = &str> {
        self.predicate_rejections.iter().map(String::as_str)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let config = ChunkerConfig::default();
        Self::compile(&config, config.prefix_phrases.clone())
    }
}
