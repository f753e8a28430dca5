//! Error types for `RitoSplice`
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use thiserror::Error;

/// The error type for `RitoSplice` operations.
///
/// Every editor returns either the transformed text or one of these values.
/// A caller that receives an error must not write anything back to disk.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Lookup Errors ====================
    /// No block with the requested name and type exists in the text.
    #[error("block {name} not found (accepted types: {})", types.join(", "))]
    BlockNotFound {
        /// The name literal that was searched for.
        name: String,
        /// The type keywords that were accepted.
        types: Vec<String>,
    },

    /// The clip exists but has no event with the requested name and type.
    #[error("event {event} not found in clip {clip}")]
    EventNotFound {
        /// The scoping clip name literal.
        clip: String,
        /// The event name literal.
        event: String,
    },

    /// A fixed registry map such as `mClipDataMap` is absent from the text.
    #[error("registry map {property} not found")]
    ParentMapNotFound {
        /// The property name of the registry map.
        property: String,
    },

    /// A list or map has no entry with the requested key or value.
    #[error("{entry} not found in {property}")]
    EntryNotFound {
        /// The property name of the list or map.
        property: String,
        /// The entry key or value literal.
        entry: String,
    },

    /// A list or map has fewer entries than the requested index.
    #[error("{property} has {len} entries, index {index} is out of range")]
    EntryIndexOutOfRange {
        /// The property name of the list or map.
        property: String,
        /// The requested index.
        index: usize,
        /// The number of entries found.
        len: usize,
    },

    /// A block or entry name is empty or otherwise unusable.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    // ==================== Structural Errors ====================
    /// Brace counting reached the end of the text before depth returned to zero.
    #[error("unbalanced braces: no closing brace for '{{' at offset {offset}")]
    UnbalancedBraces {
        /// Offset of the opening brace that was never closed.
        offset: usize,
    },

    /// A property is missing and the parent block offers no anchor line to insert it at.
    #[error("cannot synthesize {property} inside {block}: block has no body lines")]
    MapPropertyMissingAndUnsynthesizable {
        /// The property that would have been created.
        property: String,
        /// The name literal of the parent block.
        block: String,
    },

    // ==================== Parsing Errors ====================
    /// A regex built from a name or keyword failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// A numeric field value could not be parsed.
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue {
        /// The field being read.
        field: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// The config file is not valid TOML or does not match the schema.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config could not be serialized back to TOML.
    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Build a [`Error::BlockNotFound`] from a name literal and accepted type keywords.
    pub(crate) fn block_not_found(name: &str, types: &[&str]) -> Self {
        Error::BlockNotFound {
            name: name.to_string(),
            types: types.iter().map(ToString::to_string).collect(),
        }
    }
}

/// A specialized Result type for `RitoSplice` operations.
pub type Result<T> = std::result::Result<T, Error>;
