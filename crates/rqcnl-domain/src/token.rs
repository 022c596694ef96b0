//! Token module
//!
//! Tokens are produced once per parse call and are read-only afterwards.

use crate::span::Span;
use std::fmt;
use std::str::FromStr;

/// Coarse part-of-speech tag (Universal Dependencies tag set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    /// Adjective
    Adj,
    /// Adposition (preposition / postposition)
    Adp,
    /// Adverb
    Adv,
    /// Auxiliary verb
    Aux,
    /// Coordinating conjunction
    Cconj,
    /// Determiner
    Det,
    /// Interjection
    Intj,
    /// Noun
    Noun,
    /// Numeral
    Num,
    /// Particle
    Part,
    /// Pronoun
    Pron,
    /// Proper noun
    Propn,
    /// Punctuation
    Punct,
    /// Subordinating conjunction
    Sconj,
    /// Symbol
    Sym,
    /// Verb
    Verb,
    /// Whitespace token
    Space,
    /// Anything else
    X,
}

impl PosTag {
    /// Canonical upper-case label
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::Space => "SPACE",
            PosTag::X => "X",
        }
    }

    /// Map a parser label to a tag, falling back to [`PosTag::X`]
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(PosTag::X)
    }

    /// PART or VERB: tokens that can form the body of a predicate
    pub fn is_predicate_body(&self) -> bool {
        matches!(self, PosTag::Part | PosTag::Verb)
    }

    /// ADJ or ADV
    pub fn is_modifier(&self) -> bool {
        matches!(self, PosTag::Adj | PosTag::Adv)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADJ" => Ok(PosTag::Adj),
            "ADP" => Ok(PosTag::Adp),
            "ADV" => Ok(PosTag::Adv),
            "AUX" => Ok(PosTag::Aux),
            "CCONJ" | "CONJ" => Ok(PosTag::Cconj),
            "DET" => Ok(PosTag::Det),
            "INTJ" => Ok(PosTag::Intj),
            "NOUN" => Ok(PosTag::Noun),
            "NUM" => Ok(PosTag::Num),
            "PART" => Ok(PosTag::Part),
            "PRON" => Ok(PosTag::Pron),
            "PROPN" => Ok(PosTag::Propn),
            "PUNCT" => Ok(PosTag::Punct),
            "SCONJ" => Ok(PosTag::Sconj),
            "SYM" => Ok(PosTag::Sym),
            "VERB" => Ok(PosTag::Verb),
            "SPACE" => Ok(PosTag::Space),
            "X" => Ok(PosTag::X),
            other => Err(format!("Unknown part-of-speech tag: {}", other)),
        }
    }
}

/// A parsed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Position in the document
    pub index: usize,
    /// Surface text
    pub text: String,
    /// Byte offset of the first character in the parsed string
    pub start: usize,
    /// Coarse part-of-speech tag
    pub pos: PosTag,
    /// Dependency label on the edge to the head (e.g. `aux`, `nsubj`)
    pub dep: String,
    /// Index of the syntactic head (roots point at themselves)
    pub head: usize,
}

impl Token {
    /// Byte offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Span covered by the token
    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end(),
        }
    }

    /// Lower-cased surface text
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Case-insensitive comparison of the surface text
    pub fn is_word(&self, word: &str) -> bool {
        self.lower() == word.to_lowercase()
    }

    /// Check the dependency label
    pub fn has_dep(&self, label: &str) -> bool {
        self.dep == label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, start: usize, pos: PosTag) -> Token {
        Token {
            index: 0,
            text: text.to_string(),
            start,
            pos,
            dep: "ROOT".to_string(),
            head: 0,
        }
    }

    #[test]
    fn test_tag_labels_round_trip() {
        for tag in [PosTag::Adj, PosTag::Adp, PosTag::Aux, PosTag::Propn, PosTag::Verb] {
            assert_eq!(tag.as_str().parse::<PosTag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_tag_parsing_is_case_insensitive() {
        assert_eq!("verb".parse::<PosTag>().unwrap(), PosTag::Verb);
        assert!("VERBAL".parse::<PosTag>().is_err());
        assert_eq!(PosTag::from_label("???"), PosTag::X);
    }

    #[test]
    fn test_tag_groups() {
        assert!(PosTag::Part.is_predicate_body());
        assert!(PosTag::Verb.is_predicate_body());
        assert!(!PosTag::Aux.is_predicate_body());
        assert!(PosTag::Adv.is_modifier());
        assert!(!PosTag::Adp.is_modifier());
    }

    #[test]
    fn test_token_span() {
        let t = token("Weka", 12, PosTag::Propn);
        assert_eq!(t.end(), 16);
        assert_eq!(t.span(), Span { start: 12, end: 16 });
    }

    #[test]
    fn test_token_word_match() {
        let t = token("How", 0, PosTag::Sconj);
        assert!(t.is_word("how"));
        assert!(!t.is_word("however"));
        assert_eq!(t.lower(), "how");
    }
}
