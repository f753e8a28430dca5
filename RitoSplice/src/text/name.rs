//! Block and entry names
//!
//! A name is either a quoted string (`"Idle"`) or a bare hash literal
//! (`0x1a2b3c4d`). The two forms are never mixed: hash literals are never
//! quoted and string names always are.

use std::fmt;

use crate::error::{Error, Result};
use crate::utils::hash::fnv1a_lower;

/// A block or map-entry name in one of its two textual forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockName {
    /// A double-quoted string name, stored without the quotes.
    Quoted(String),
    /// A `0x` hash literal, stored exactly as written.
    Hash(String),
}

impl BlockName {
    /// Parse a raw caller value.
    ///
    /// `0x...` is a hash literal, `"..."` is unwrapped, anything else is a
    /// plain string name.
    ///
    /// # Errors
    /// Returns [`Error::InvalidName`] for empty names, names containing
    /// newlines or braces, and malformed hash literals.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if let Some(digits) = raw.strip_prefix("0x") {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(Error::InvalidName(raw.to_string()));
            }
            return Ok(BlockName::Hash(raw.to_string()));
        }

        let inner = raw
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .unwrap_or(raw);
        if inner.is_empty() || inner.contains(['\n', '{', '}', '"']) {
            return Err(Error::InvalidName(raw.to_string()));
        }
        Ok(BlockName::Quoted(inner.to_string()))
    }

    /// The exact text form: `"Name"` or `0x...`.
    pub fn literal(&self) -> String {
        match self {
            BlockName::Quoted(s) => format!("\"{s}\""),
            BlockName::Hash(h) => h.clone(),
        }
    }

    /// Escaped regex fragment matching the literal.
    ///
    /// Hash literals are anchored on a word boundary so `0x12` does not
    /// match inside a longer token.
    pub fn pattern(&self) -> String {
        match self {
            BlockName::Quoted(_) => regex::escape(&self.literal()),
            BlockName::Hash(h) => format!(r"\b{}", regex::escape(h)),
        }
    }

    /// The FNV-1a hash literal the game uses for this name.
    ///
    /// Hash names are returned as written.
    pub fn hashed(&self) -> String {
        match self {
            BlockName::Quoted(s) => format!("0x{:08x}", fnv1a_lower(s)),
            BlockName::Hash(h) => h.clone(),
        }
    }

    /// Whether this is a hash literal.
    pub fn is_hash(&self) -> bool {
        matches!(self, BlockName::Hash(_))
    }
}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockName::Quoted(s) => write!(f, "\"{s}\""),
            BlockName::Hash(h) => write!(f, "{h}"),
        }
    }
}

/// Format a raw value for a name-, hash- or path-typed field.
///
/// `0x...` stays bare, an already quoted value stays as-is, anything else
/// is wrapped in double quotes. Every name-typed field write goes through
/// this.
pub fn format_name_value(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("0x") {
        raw.to_string()
    } else if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw.to_string()
    } else {
        format!("\"{raw}\"")
    }
}

/// Format an `f32` the way ritobin prints it (`3`, `0.5`, `-1.25`).
pub fn format_f32(value: f32) -> String {
    format!("{value}")
}
