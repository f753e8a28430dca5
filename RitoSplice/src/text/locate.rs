//! Named block and property lookup
//!
//! Blocks are found by the anchor `<name> = <Type> {` and resolved to a
//! full span with the brace scanner. Spans are computed fresh from the text
//! on every call; any edit invalidates them.

use std::ops::Range;

use regex::Regex;

use super::name::BlockName;
use super::scan::{depth_at, find_matching_close, indent_of, line_end, line_start};
use crate::error::{Error, Result};

/// Opening and closing brace offsets of a block or property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Braces {
    /// Offset of the `{`.
    pub open: usize,
    /// Offset of the matching `}`.
    pub close: usize,
}

impl Braces {
    /// Whether `pos` lies inside the braces.
    pub fn contains(&self, pos: usize) -> bool {
        pos > self.open && pos < self.close
    }
}

/// A located `<name> = <Type> { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    /// The matched type keyword.
    pub type_name: String,
    /// The block name in the form it appears in the text.
    pub name: BlockName,
    /// Offset of the first character of the name.
    pub start: usize,
    /// Offset of the opening brace.
    pub open: usize,
    /// Offset of the matching closing brace.
    pub close: usize,
}

impl BlockSpan {
    pub fn braces(&self) -> Braces {
        Braces { open: self.open, close: self.close }
    }

    /// The block text, from the name through the closing brace.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..=self.close]
    }

    /// Leading whitespace of the declaration line.
    pub fn indent<'a>(&self, text: &'a str) -> &'a str {
        indent_of(&text[line_start(text, self.start)..line_end(text, self.start)])
    }
}

/// A located `<prop>: <decl> = [Type] { ... }` property inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpan {
    /// The property name.
    pub name: String,
    /// Offset of the start of the property's line.
    pub line_start: usize,
    /// Offset of the opening brace.
    pub open: usize,
    /// Offset of the matching closing brace.
    pub close: usize,
    /// Leading whitespace of the property line.
    pub indent: String,
}

impl PropertySpan {
    pub fn braces(&self) -> Braces {
        Braces { open: self.open, close: self.close }
    }
}

fn type_alternation(types: &[&str]) -> String {
    types
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

fn block_regex(name: &BlockName, types: &[&str]) -> Result<Regex> {
    let pattern = format!(r"{}\s*=\s*({})\s*\{{", name.pattern(), type_alternation(types));
    Ok(Regex::new(&pattern)?)
}

/// Every block named `name` with one of `types`, in document order.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] if a matched block never closes.
pub fn locate_all(text: &str, name: &BlockName, types: &[&str]) -> Result<Vec<BlockSpan>> {
    let re = block_regex(name, types)?;
    let mut spans = Vec::new();
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(ty)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let open = whole.end() - 1;
        let close = find_matching_close(text, open)?;
        spans.push(BlockSpan {
            type_name: ty.as_str().to_string(),
            name: name.clone(),
            start: whole.start(),
            open,
            close,
        });
    }
    Ok(spans)
}

/// The first block named `name` with one of `types`.
///
/// When more than one candidate exists the first in document order wins
/// and a warning is logged.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] if the matched block never closes.
pub fn locate(text: &str, name: &BlockName, types: &[&str]) -> Result<Option<BlockSpan>> {
    locate_in(text, 0..text.len(), name, types)
}

/// Like [`locate`], restricted to a byte range of the text.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] if the matched block never closes.
pub fn locate_in(
    text: &str,
    range: Range<usize>,
    name: &BlockName,
    types: &[&str],
) -> Result<Option<BlockSpan>> {
    let re = block_regex(name, types)?;
    let haystack = &text[range.clone()];
    let mut matches = re.captures_iter(haystack);

    let Some(caps) = matches.next() else {
        return Ok(None);
    };
    if matches.next().is_some() {
        tracing::warn!("Multiple blocks named {} found, using the first", name);
    }

    let (Some(whole), Some(ty)) = (caps.get(0), caps.get(1)) else {
        return Ok(None);
    };
    let open = range.start + whole.end() - 1;
    let close = find_matching_close(text, open)?;
    Ok(Some(BlockSpan {
        type_name: ty.as_str().to_string(),
        name: name.clone(),
        start: range.start + whole.start(),
        open,
        close,
    }))
}

/// Like [`locate`], failing with [`Error::BlockNotFound`] when absent.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] or [`Error::UnbalancedBraces`].
pub fn require(text: &str, name: &BlockName, types: &[&str]) -> Result<BlockSpan> {
    locate(text, name, types)?.ok_or_else(|| Error::block_not_found(&name.literal(), types))
}

/// Every block with one of `types`, whatever its name, in document order.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] if a matched block never closes.
pub fn list_blocks(text: &str, types: &[&str]) -> Result<Vec<BlockSpan>> {
    let pattern = format!(
        r#"("[^"\n]*"|\b0x[0-9A-Fa-f]+)\s*=\s*({})\s*\{{"#,
        type_alternation(types)
    );
    let re = Regex::new(&pattern)?;

    let mut spans = Vec::new();
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(name), Some(ty)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let Ok(name) = BlockName::parse(name.as_str()) else {
            tracing::debug!("Skipping block with unusable name {}", name.as_str());
            continue;
        };
        let open = whole.end() - 1;
        let close = find_matching_close(text, open)?;
        spans.push(BlockSpan {
            type_name: ty.as_str().to_string(),
            name,
            start: whole.start(),
            open,
            close,
        });
    }
    Ok(spans)
}

/// Find a direct-child property `<prop>: ... = [Type] {` inside `parent`.
///
/// Properties nested deeper (for example inside an event of a clip) are
/// ignored.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] if the property never closes.
pub fn locate_property(text: &str, parent: Braces, property: &str) -> Result<Option<PropertySpan>> {
    let pattern = format!(
        r"(?m)^([ \t]*){}\s*:[^=\n]*=\s*(?:[A-Za-z_]\w*\s*)?\{{",
        regex::escape(property)
    );
    let re = Regex::new(&pattern)?;
    let body_start = parent.open + 1;
    let body = &text[body_start..parent.close];

    for caps in re.captures_iter(body) {
        let (Some(whole), Some(indent)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let prop_line = body_start + whole.start();
        // A match at body offset 0 shares the parent's opening line.
        if prop_line != line_start(text, prop_line) {
            continue;
        }
        if depth_at(text, parent.open, prop_line) != 1 {
            continue;
        }
        let open = body_start + whole.end() - 1;
        let close = find_matching_close(text, open)?;
        return Ok(Some(PropertySpan {
            name: property.to_string(),
            line_start: prop_line,
            open,
            close,
            indent: indent.as_str().to_string(),
        }));
    }
    Ok(None)
}

/// Find the top-level registry map `<prop>: map[...] = {` anywhere in the text.
///
/// Used for fixed registries such as `mClipDataMap` and `entries`, which are
/// anchored on their literal property name rather than a block name.
///
/// # Errors
/// Returns [`Error::ParentMapNotFound`] when the map is absent.
pub fn locate_registry(text: &str, property: &str) -> Result<PropertySpan> {
    let pattern = format!(r"(?m)^([ \t]*){}\s*:\s*map\[[^\]\n]*\]\s*=\s*\{{", regex::escape(property));
    let re = Regex::new(&pattern)?;
    let caps = re.captures(text).ok_or_else(|| Error::ParentMapNotFound {
        property: property.to_string(),
    })?;
    let (Some(whole), Some(indent)) = (caps.get(0), caps.get(1)) else {
        return Err(Error::ParentMapNotFound { property: property.to_string() });
    };
    let open = whole.end() - 1;
    let close = find_matching_close(text, open)?;
    Ok(PropertySpan {
        name: property.to_string(),
        line_start: whole.start(),
        open,
        close,
        indent: indent.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::keywords::{ATOMIC_CLIP, CLIP_TYPES, EVENT_DATA_MAP, SELECTOR_CLIP};

    const SAMPLE: &str = r#"mClipDataMap: map[hash,pointer] = {
    "Idle" = AtomicClipData {
        mEventDataMap: map[hash,pointer] = {
            "Hit" = SoundEventData {
                mSoundName: string = "hit.wav"
            }
        }
    }
    0x1234abcd = SelectorClipData {
        mFlags: u32 = 1
    }
    "Idle" = SequencerClipData {
    }
}
"#;

    fn name(raw: &str) -> BlockName {
        BlockName::parse(raw).unwrap()
    }

    #[test]
    fn test_locate_quoted_name() {
        let span = locate(SAMPLE, &name("Idle"), &CLIP_TYPES).unwrap().unwrap();
        assert_eq!(span.type_name, ATOMIC_CLIP);
        assert!(span.slice(SAMPLE).starts_with("\"Idle\" = AtomicClipData {"));
        assert_eq!(&SAMPLE[span.close..=span.close], "}");
        assert_eq!(span.indent(SAMPLE), "    ");
    }

    #[test]
    fn test_locate_hash_name() {
        let span = locate(SAMPLE, &name("0x1234abcd"), &CLIP_TYPES).unwrap().unwrap();
        assert_eq!(span.type_name, SELECTOR_CLIP);
        assert!(span.slice(SAMPLE).ends_with("mFlags: u32 = 1\n    }"));
    }

    #[test]
    fn test_hash_name_needs_whole_token() {
        assert!(locate(SAMPLE, &name("0x1234abc"), &CLIP_TYPES).unwrap().is_none());
    }

    #[test]
    fn test_type_restriction() {
        let span = locate(SAMPLE, &name("Idle"), &["SequencerClipData"]).unwrap().unwrap();
        assert_eq!(span.type_name, "SequencerClipData");
        assert!(locate(SAMPLE, &name("Idle"), &["TrackData"]).unwrap().is_none());
    }

    #[test]
    fn test_locate_all_and_require() {
        assert_eq!(locate_all(SAMPLE, &name("Idle"), &CLIP_TYPES).unwrap().len(), 2);
        let err = require(SAMPLE, &name("Missing"), &CLIP_TYPES).unwrap_err();
        assert!(matches!(err, Error::BlockNotFound { .. }));
    }

    #[test]
    fn test_locate_in_range() {
        let first = locate(SAMPLE, &name("Idle"), &CLIP_TYPES).unwrap().unwrap();
        let second = locate_in(SAMPLE, first.close..SAMPLE.len(), &name("Idle"), &CLIP_TYPES)
            .unwrap()
            .unwrap();
        assert_eq!(second.type_name, "SequencerClipData");
    }

    #[test]
    fn test_list_blocks() {
        let spans = list_blocks(SAMPLE, &CLIP_TYPES).unwrap();
        let names: Vec<String> = spans.iter().map(|s| s.name.literal()).collect();
        assert_eq!(names, vec!["\"Idle\"", "0x1234abcd", "\"Idle\""]);
    }

    #[test]
    fn test_locate_property_direct_child_only() {
        let clip = locate(SAMPLE, &name("Idle"), &CLIP_TYPES).unwrap().unwrap();
        let prop = locate_property(SAMPLE, clip.braces(), EVENT_DATA_MAP).unwrap().unwrap();
        assert_eq!(prop.indent, "        ");
        assert_eq!(&SAMPLE[prop.open..=prop.open], "{");

        // mSoundName lives inside the event, not directly inside the clip
        let registry = locate_registry(SAMPLE, "mClipDataMap").unwrap();
        assert!(locate_property(SAMPLE, registry.braces(), EVENT_DATA_MAP).unwrap().is_none());
    }

    #[test]
    fn test_locate_property_inline_braces() {
        let text = "\"Run\" = AtomicClipData {\n    mEventDataMap: map[hash,pointer] = {}\n}\n";
        let clip = locate(text, &name("Run"), &CLIP_TYPES).unwrap().unwrap();
        let prop = locate_property(text, clip.braces(), EVENT_DATA_MAP).unwrap().unwrap();
        assert_eq!(prop.open, text.find("{}").unwrap());
        assert_eq!(prop.close, prop.open + 1);
        assert_eq!(prop.line_start, text.find("    mEventDataMap").unwrap());
    }

    #[test]
    fn test_locate_registry_missing() {
        let err = locate_registry("a = T {}", "mClipDataMap").unwrap_err();
        assert!(matches!(err, Error::ParentMapNotFound { .. }));
    }
}
