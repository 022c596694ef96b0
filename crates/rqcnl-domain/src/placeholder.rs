//! Placeholder module
//!
//! Placeholders are `EC{n}` for entity chunks and `PC{n}` for predicate
//! chunks, with `n >= 1`.

use crate::span::Span;
use std::fmt;
use std::str::FromStr;

/// Kind of chunk a placeholder stands for
///
/// Entity chunks order before predicate chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChunkKind {
    /// Noun-phrase-like fragment (`EC`)
    Entity,
    /// Verb/predicate-like fragment (`PC`)
    Predicate,
}

impl ChunkKind {
    /// Placeholder prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            ChunkKind::Entity => "EC",
            ChunkKind::Predicate => "PC",
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Positional placeholder such as `EC1` or `PC2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placeholder {
    /// Chunk kind
    pub kind: ChunkKind,
    /// 1-based position within one extraction pass
    pub index: u32,
}

impl Placeholder {
    /// Entity placeholder `EC{index}`
    pub fn entity(index: u32) -> Self {
        Self {
            kind: ChunkKind::Entity,
            index,
        }
    }

    /// Predicate placeholder `PC{index}`
    pub fn predicate(index: u32) -> Self {
        Self {
            kind: ChunkKind::Predicate,
            index,
        }
    }

    /// Rendered length in bytes
    pub fn rendered_len(&self) -> usize {
        self.to_string().len()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index)
    }
}

impl FromStr for Placeholder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = if s.starts_with("EC") {
            ChunkKind::Entity
        } else if s.starts_with("PC") {
            ChunkKind::Predicate
        } else {
            return Err(format!("Not a placeholder: {}", s));
        };

        let digits = &s[2..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Placeholder has no numeric index: {}", s));
        }
        let index: u32 = digits
            .parse()
            .map_err(|e| format!("Invalid placeholder index in {}: {}", s, e))?;
        if index == 0 {
            return Err(format!("Placeholder index must start at 1: {}", s));
        }

        Ok(Self { kind, index })
    }
}

/// Find every placeholder occurrence in `text`, left to right
///
/// An occurrence is `EC` or `PC` followed by one or more digits; digits are
/// consumed greedily. Occurrences with index 0 are ignored.
pub fn scan_placeholders(text: &str) -> Vec<(Span, Placeholder)> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i + 2 < bytes.len() {
        let kind = match &bytes[i..i + 2] {
            b"EC" => Some(ChunkKind::Entity),
            b"PC" => Some(ChunkKind::Predicate),
            _ => None,
        };
        let Some(kind) = kind else {
            i += 1;
            continue;
        };

        let digits_end = bytes[i + 2..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |p| i + 2 + p);
        if digits_end == i + 2 {
            i += 1;
            continue;
        }

        match text[i + 2..digits_end].parse::<u32>() {
            Ok(index) if index > 0 => {
                found.push((
                    Span {
                        start: i,
                        end: digits_end,
                    },
                    Placeholder { kind, index },
                ));
            }
            _ => {}
        }
        i = digits_end;
    }

    found
}
