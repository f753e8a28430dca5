//! Entry editing inside map and list properties
//!
//! Works on one property (`mEventDataMap`, `mClipNameList`,
//! `mSelectorPairDataList`, ...) directly inside an already located parent
//! block. Hash maps and scalar lists separate entries with newlines only;
//! the two embedded-struct pair lists separate entries with commas.

use regex::Regex;

use super::keywords::{
    CLIP_NAME_LIST, CONDITION_FLOAT_PAIR, CONDITION_FLOAT_PAIR_LIST, EVENT_DATA_MAP,
    SELECTOR_PAIR, SELECTOR_PAIR_LIST, WEIGHT_LIST,
};
use super::locate::{BlockSpan, Braces, PropertySpan, locate_property};
use super::name::BlockName;
use super::scan::{
    BodyLine, body_entries, body_lines, depth_at, find_matching_close, indent_of, line_start,
};
use super::splice::{insert_before_close, insert_line_after, reindent, remove_lines, remove_span};
use crate::config::Layout;
use crate::error::{Error, Result};

/// How entries of a property are separated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// One entry per line (or per brace-balanced group of lines), no commas.
    Newline,
    /// Embedded structs separated by commas.
    Comma,
}

/// A map or list property the editor knows how to create and edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapProperty {
    /// Property name, e.g. `mEventDataMap`.
    pub name: &'static str,
    /// Container declaration, e.g. `map[hash,pointer]`.
    pub decl: &'static str,
    pub separator: Separator,
    /// Struct keyword of comma-separated entries (`SelectorPairData`).
    pub item_type: Option<&'static str>,
}

pub const EVENT_MAP: MapProperty = MapProperty {
    name: EVENT_DATA_MAP,
    decl: "map[hash,pointer]",
    separator: Separator::Newline,
    item_type: None,
};

pub const CLIP_NAMES: MapProperty = MapProperty {
    name: CLIP_NAME_LIST,
    decl: "list[hash]",
    separator: Separator::Newline,
    item_type: None,
};

pub const SELECTOR_PAIRS: MapProperty = MapProperty {
    name: SELECTOR_PAIR_LIST,
    decl: "list[embed]",
    separator: Separator::Comma,
    item_type: Some(SELECTOR_PAIR),
};

pub const CONDITION_FLOAT_PAIRS: MapProperty = MapProperty {
    name: CONDITION_FLOAT_PAIR_LIST,
    decl: "list[embed]",
    separator: Separator::Comma,
    item_type: Some(CONDITION_FLOAT_PAIR),
};

pub const MASK_WEIGHTS: MapProperty = MapProperty {
    name: WEIGHT_LIST,
    decl: "list[f32]",
    separator: Separator::Newline,
    item_type: None,
};

/// Append `entry` to `property` inside `parent`, creating the property if absent.
///
/// The entry is re-indented one level deeper than the property line and
/// placed directly above the property's closing brace.
///
/// # Errors
/// Returns [`Error::MapPropertyMissingAndUnsynthesizable`] if the property
/// is absent and the parent has no body lines to anchor it on, or
/// [`Error::UnbalancedBraces`] for malformed text.
pub fn add_entry(
    text: &str,
    parent: &BlockSpan,
    property: &MapProperty,
    entry: &str,
    layout: &Layout,
) -> Result<String> {
    match locate_property(text, parent.braces(), property.name)? {
        Some(span) => Ok(append_to_property(text, &span, property, entry, layout)),
        None => synthesize_property(text, parent, property, entry, layout),
    }
}

fn append_to_property(
    text: &str,
    span: &PropertySpan,
    property: &MapProperty,
    entry: &str,
    layout: &Layout,
) -> String {
    let entry_indent = layout.deeper(&span.indent);
    let mut braces = span.braces();

    let filled = text[braces.open + 1..braces.close].trim_end();
    if property.separator == Separator::Comma && !filled.trim().is_empty() && !filled.ends_with(',') {
        let at = braces.open + 1 + filled.len();
        let mut with_comma = String::with_capacity(text.len() + 1);
        with_comma.push_str(&text[..at]);
        with_comma.push(',');
        with_comma.push_str(&text[at..]);
        braces.close += 1;
        return insert_before_close(&with_comma, braces, entry, &entry_indent, &span.indent);
    }

    insert_before_close(text, braces, entry, &entry_indent, &span.indent)
}

pub(crate) fn is_property_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    match trimmed.find(':') {
        Some(colon) => {
            let key = &trimmed[..colon];
            !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

/// Create `<prop>: <decl> = { <entry> }` inside `parent`.
fn synthesize_property(
    text: &str,
    parent: &BlockSpan,
    property: &MapProperty,
    entry: &str,
    layout: &Layout,
) -> Result<String> {
    tracing::debug!("Creating {} inside {}", property.name, parent.name);
    append_child(
        text,
        parent.braces(),
        parent.indent(text),
        &parent.name.literal(),
        property.name,
        layout,
        |indent| {
            format!(
                "{indent}{}: {} = {{\n{}\n{indent}}}",
                property.name,
                property.decl,
                reindent(entry, &layout.deeper(indent))
            )
        },
    )
}

/// Insert a new direct child into a block body.
///
/// The child goes after the last direct-child property of the block (after
/// that property's closing line when it spans several lines), or directly
/// after the opening brace line when the block has none. `build` receives
/// the sibling indentation and returns the full child text.
pub(crate) fn append_child(
    text: &str,
    parent: Braces,
    parent_indent: &str,
    parent_label: &str,
    child: &str,
    layout: &Layout,
    build: impl FnOnce(&str) -> String,
) -> Result<String> {
    if line_start(text, parent.open) == line_start(text, parent.close) {
        return Err(Error::MapPropertyMissingAndUnsynthesizable {
            property: child.to_string(),
            block: parent_label.to_string(),
        });
    }

    let lines = body_lines(text, parent.open, parent.close);
    let indent = sibling_indent(text, &lines, parent_indent, layout);
    let block = build(&indent);

    let anchor = body_entries(text, &lines)
        .into_iter()
        .rfind(|e| is_property_line(lines[e.first].text(text)))
        .map(|e| lines[e.last]);

    Ok(match anchor {
        Some(line) => insert_line_after(text, line.start, &block),
        None => insert_line_after(text, parent.open, &block),
    })
}

/// Indentation of direct children: the first body line's, or one level
/// deeper than the parent.
pub(crate) fn sibling_indent(
    text: &str,
    lines: &[BodyLine],
    parent_indent: &str,
    layout: &Layout,
) -> String {
    lines
        .iter()
        .find(|l| !l.is_blank(text))
        .map_or_else(
            || layout.deeper(parent_indent),
            |l| indent_of(l.text(text)).to_string(),
        )
}

/// Brace-balanced entries of a newline-separated property, as line ranges.
fn newline_entries(text: &str, span: &PropertySpan) -> (Vec<BodyLine>, Vec<(usize, usize)>) {
    let lines = body_lines(text, span.open, span.close);
    let entries = body_entries(text, &lines)
        .into_iter()
        .map(|e| (e.first, e.last))
        .collect();
    (lines, entries)
}

/// `(start, close)` offsets of the struct items of a comma-separated property.
fn struct_items(text: &str, braces: Braces, item_type: &str) -> Result<Vec<(usize, usize)>> {
    let re = Regex::new(&format!(r"\b{}\s*\{{", regex::escape(item_type)))?;
    let body = &text[braces.open + 1..braces.close];
    let mut items = Vec::new();
    for m in re.find_iter(body) {
        let start = braces.open + 1 + m.start();
        if depth_at(text, braces.open, start) != 1 {
            continue;
        }
        let close = find_matching_close(text, start)?;
        items.push((start, close));
    }
    Ok(items)
}

/// The entries of `property` inside `parent`, in order, as trimmed text.
///
/// A missing property has no entries.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] for malformed text.
pub fn list_entries(text: &str, parent: Braces, property: &MapProperty) -> Result<Vec<String>> {
    let Some(span) = locate_property(text, parent, property.name)? else {
        return Ok(Vec::new());
    };

    match (property.separator, property.item_type) {
        (Separator::Comma, Some(item_type)) => Ok(struct_items(text, span.braces(), item_type)?
            .into_iter()
            .map(|(start, close)| text[start..=close].to_string())
            .collect()),
        _ => {
            let (lines, entries) = newline_entries(text, &span);
            Ok(entries
                .into_iter()
                .map(|(first, last)| text[lines[first].start..lines[last].end].trim().to_string())
                .collect())
        }
    }
}

/// Remove the entry at `index` from `property` inside `parent`.
///
/// Newline-separated properties lose the entry's whole lines. Struct lists
/// lose the matched item, and any comma left orphaned next to a brace or
/// another comma is collapsed.
///
/// # Errors
/// Returns [`Error::EntryIndexOutOfRange`] when the property is missing or
/// shorter than `index + 1`.
pub fn remove_entry_at(
    text: &str,
    parent: Braces,
    property: &MapProperty,
    index: usize,
) -> Result<String> {
    let out_of_range = |len: usize| Error::EntryIndexOutOfRange {
        property: property.name.to_string(),
        index,
        len,
    };
    let span = locate_property(text, parent, property.name)?.ok_or_else(|| out_of_range(0))?;

    match (property.separator, property.item_type) {
        (Separator::Comma, Some(item_type)) => {
            let items = struct_items(text, span.braces(), item_type)?;
            let &(start, close) = items.get(index).ok_or_else(|| out_of_range(items.len()))?;
            remove_struct_item(text, span.braces(), start, close)
        }
        _ => {
            let (lines, entries) = newline_entries(text, &span);
            let &(first, last) = entries.get(index).ok_or_else(|| out_of_range(entries.len()))?;
            Ok(remove_lines(text, lines[first].start, lines[last].start))
        }
    }
}

/// Remove the entry keyed `key` from a newline-separated property.
///
/// Matches map entries (`<key> = ...`) and bare scalar list entries alike.
/// Returns `None` when no such entry exists.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] for malformed text.
pub fn remove_entry_named(
    text: &str,
    parent: Braces,
    property: &MapProperty,
    key: &BlockName,
) -> Result<Option<String>> {
    let Some(span) = locate_property(text, parent, property.name)? else {
        return Ok(None);
    };
    let key_re = Regex::new(&format!(r"^\s*{}\s*(?:=|$)", key.pattern()))?;
    let (lines, entries) = newline_entries(text, &span);
    Ok(entries
        .into_iter()
        .find(|&(first, _)| key_re.is_match(lines[first].text(text)))
        .map(|(first, last)| remove_lines(text, lines[first].start, lines[last].start)))
}

fn remove_struct_item(text: &str, list: Braces, start: usize, close: usize) -> Result<String> {
    let after = &text[close + 1..list.close];
    let trailing_comma = after
        .find(|c: char| !c.is_whitespace())
        .filter(|&i| after.as_bytes()[i] == b',')
        .map(|i| close + 1 + i);

    let removed = match trailing_comma {
        Some(comma) => remove_span(text, start, comma),
        None => remove_span(text, start, close),
    };
    let shrink = text.len() - removed.len();
    collapse_orphan_commas(&removed, Braces { open: list.open, close: list.close - shrink })
}

/// Collapse `,}` `{,` and `,,` (with any whitespace between) inside a list.
fn collapse_orphan_commas(text: &str, list: Braces) -> Result<String> {
    let region = &text[list.open..=list.close];
    let before_close = Regex::new(r",(\s*)\}")?;
    let after_open = Regex::new(r"\{(\s*),")?;
    let doubled = Regex::new(r",(\s*),")?;

    let region = before_close.replace_all(region, "$1}");
    let region = after_open.replace_all(&region, "{$1");
    let region = doubled.replace_all(&region, ",$1");

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..list.open]);
    out.push_str(&region);
    out.push_str(&text[list.close + 1..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::keywords::CLIP_TYPES;
    use crate::text::locate::require;
    use pretty_assertions::assert_eq;

    fn clip(text: &str, name: &str) -> BlockSpan {
        require(text, &BlockName::parse(name).unwrap(), &CLIP_TYPES).unwrap()
    }

    const IDLE_EMPTY_MAP: &str = "mClipDataMap: map[hash,pointer] = {
    \"Idle\" = AtomicClipData {
        mEventDataMap: map[hash,pointer] = {
        }
    }
}
";

    #[test]
    fn test_add_entry_into_empty_map() {
        let parent = clip(IDLE_EMPTY_MAP, "Idle");
        let entry = "\"Hit\" = SoundEventData {\n    mSoundName: string = \"hit.wav\"\n}";
        let out = add_entry(IDLE_EMPTY_MAP, &parent, &EVENT_MAP, entry, &Layout::default()).unwrap();
        assert_eq!(
            out,
            "mClipDataMap: map[hash,pointer] = {
    \"Idle\" = AtomicClipData {
        mEventDataMap: map[hash,pointer] = {
            \"Hit\" = SoundEventData {
                mSoundName: string = \"hit.wav\"
            }
        }
    }
}
"
        );
    }

    #[test]
    fn test_add_entry_is_comma_free_for_maps() {
        let text = "\"Run\" = AtomicClipData {
    mEventDataMap: map[hash,pointer] = {
        \"a\" = SoundEventData {}
        \"b\" = FaceTargetEventData {}
    }
}
";
        let parent = clip(text, "Run");
        let out = add_entry(text, &parent, &EVENT_MAP, "\"c\" = SoundEventData {}", &Layout::default())
            .unwrap();
        assert_eq!(out.matches(',').count(), text.matches(',').count());
        let entries = list_entries(&out, clip(&out, "Run").braces(), &EVENT_MAP).unwrap();
        assert_eq!(
            entries,
            vec![
                "\"a\" = SoundEventData {}",
                "\"b\" = FaceTargetEventData {}",
                "\"c\" = SoundEventData {}",
            ]
        );
    }

    #[test]
    fn test_add_struct_entry_inserts_one_comma() {
        let text = "\"Pick\" = SelectorClipData {
    mSelectorPairDataList: list[embed] = {
        SelectorPairData {
            mClipName: hash = \"A\"
            mProbability: f32 = 0.5
        }
    }
}
";
        let parent = clip(text, "Pick");
        let entry = "SelectorPairData {\n    mClipName: hash = \"B\"\n    mProbability: f32 = 0.5\n}";
        let out = add_entry(text, &parent, &SELECTOR_PAIRS, entry, &Layout::default()).unwrap();
        assert_eq!(out.matches(',').count(), 1);
        assert_eq!(
            out,
            "\"Pick\" = SelectorClipData {
    mSelectorPairDataList: list[embed] = {
        SelectorPairData {
            mClipName: hash = \"A\"
            mProbability: f32 = 0.5
        },
        SelectorPairData {
            mClipName: hash = \"B\"
            mProbability: f32 = 0.5
        }
    }
}
"
        );
    }

    #[test]
    fn test_synthesize_after_last_property() {
        let text = "\"Run\" = AtomicClipData {
    mFlags: u32 = 1
    mAnimationResourceData: embed = AnimationResourceData {
        mAnimationFilePath: string = \"run.anm\"
    }
}
";
        let parent = clip(text, "Run");
        let out = add_entry(text, &parent, &EVENT_MAP, "\"s\" = SoundEventData {}", &Layout::default())
            .unwrap();
        assert_eq!(
            out,
            "\"Run\" = AtomicClipData {
    mFlags: u32 = 1
    mAnimationResourceData: embed = AnimationResourceData {
        mAnimationFilePath: string = \"run.anm\"
    }
    mEventDataMap: map[hash,pointer] = {
        \"s\" = SoundEventData {}
    }
}
"
        );
    }

    #[test]
    fn test_synthesize_in_empty_block() {
        let text = "    \"Run\" = SequencerClipData {\n    }\n";
        let parent = clip(text, "Run");
        let out = add_entry(text, &parent, &CLIP_NAMES, "\"Idle\"", &Layout::default()).unwrap();
        assert_eq!(
            out,
            "    \"Run\" = SequencerClipData {\n        mClipNameList: list[hash] = {\n            \"Idle\"\n        }\n    }\n"
        );
    }

    #[test]
    fn test_add_entry_into_inline_empty_map() {
        let text = "\"Run\" = AtomicClipData {\n    mEventDataMap: map[hash,pointer] = {}\n}\n";
        let parent = clip(text, "Run");
        let out = add_entry(text, &parent, &EVENT_MAP, "\"x\" = SoundEventData {}", &Layout::default())
            .unwrap();
        assert_eq!(
            out,
            "\"Run\" = AtomicClipData {\n    mEventDataMap: map[hash,pointer] = {\n        \"x\" = SoundEventData {}\n    }\n}\n"
        );
    }

    #[test]
    fn test_first_struct_entry_has_no_comma() {
        let text = "\"Pick\" = SelectorClipData {\n    mSelectorPairDataList: list[embed] = {\n    }\n}\n";
        let parent = clip(text, "Pick");
        let entry = "SelectorPairData {\n    mClipName: hash = \"A\"\n}";
        let out = add_entry(text, &parent, &SELECTOR_PAIRS, entry, &Layout::default()).unwrap();
        assert_eq!(
            out,
            "\"Pick\" = SelectorClipData {
    mSelectorPairDataList: list[embed] = {
        SelectorPairData {
            mClipName: hash = \"A\"
        }
    }
}
"
        );

        let inline = "\"Pick\" = ConditionFloatClipData {\n    mConditionFloatPairDataList: list[embed] = {}\n}\n";
        let parent = clip(inline, "Pick");
        let entry = "ConditionFloatPairData {\n    mClipName: hash = \"A\"\n}";
        let out = add_entry(inline, &parent, &CONDITION_FLOAT_PAIRS, entry, &Layout::default()).unwrap();
        assert_eq!(out.matches(',').count(), 0);
        assert!(out.contains("list[embed] = {\n        ConditionFloatPairData {\n"));
    }

    #[test]
    fn test_synthesize_fails_on_same_line_block() {
        let text = "\"Run\" = AtomicClipData {}\n";
        let parent = clip(text, "Run");
        let err = add_entry(text, &parent, &EVENT_MAP, "\"s\" = SoundEventData {}", &Layout::default())
            .unwrap_err();
        assert!(matches!(err, Error::MapPropertyMissingAndUnsynthesizable { .. }));
    }

    #[test]
    fn test_remove_scalar_entry() {
        let text = "\"Seq\" = SequencerClipData {
    mClipNameList: list[hash] = {
        \"A\"
        0x12345678
        \"C\"
    }
}
";
        let parent = clip(text, "Seq");
        let out = remove_entry_at(text, parent.braces(), &CLIP_NAMES, 1).unwrap();
        let entries = list_entries(&out, clip(&out, "Seq").braces(), &CLIP_NAMES).unwrap();
        assert_eq!(entries, vec!["\"A\"", "\"C\""]);

        let err = remove_entry_at(text, parent.braces(), &CLIP_NAMES, 3).unwrap_err();
        assert!(matches!(err, Error::EntryIndexOutOfRange { len: 3, .. }));
    }

    #[test]
    fn test_remove_same_line_entry_keeps_next_line() {
        let text = "\"Run\" = AtomicClipData {
    mEventDataMap: map[hash,pointer] = {
        \"face\" = FaceTargetEventData {}
        \"p\" = ParticleEventData {
            mStartFrame: f32 = 2
        }
    }
}
";
        let parent = clip(text, "Run");
        let out = remove_entry_at(text, parent.braces(), &EVENT_MAP, 0).unwrap();
        assert_eq!(out, text.replace("        \"face\" = FaceTargetEventData {}\n", ""));
    }

    #[test]
    fn test_remove_struct_items_collapse_commas() {
        let text = "\"Pick\" = SelectorClipData {
    mSelectorPairDataList: list[embed] = {
        SelectorPairData {
            mClipName: hash = \"A\"
        },
        SelectorPairData {
            mClipName: hash = \"B\"
        },
        SelectorPairData {
            mClipName: hash = \"C\"
        }
    }
}
";
        let parent = clip(text, "Pick");

        let middle = remove_entry_at(text, parent.braces(), &SELECTOR_PAIRS, 1).unwrap();
        assert_eq!(middle.matches(',').count(), 1);
        assert!(!middle.contains("\"B\""));

        let last = remove_entry_at(text, parent.braces(), &SELECTOR_PAIRS, 2).unwrap();
        assert_eq!(last.matches(',').count(), 1);
        assert!(last.contains("        },\n        SelectorPairData {\n            mClipName: hash = \"B\"\n        }\n    }"));

        let first = remove_entry_at(text, parent.braces(), &SELECTOR_PAIRS, 0).unwrap();
        assert!(first.contains("list[embed] = {\n        SelectorPairData {\n            mClipName: hash = \"B\""));
    }

    #[test]
    fn test_remove_entry_named() {
        let text = "\"Run\" = AtomicClipData {
    mEventDataMap: map[hash,pointer] = {
        0xaabbccdd = SoundEventData {}
        \"keep\" = SoundEventData {}
    }
}
";
        let parent = clip(text, "Run");
        let key = BlockName::parse("0xaabbccdd").unwrap();
        let out = remove_entry_named(text, parent.braces(), &EVENT_MAP, &key).unwrap().unwrap();
        assert!(!out.contains("0xaabbccdd"));
        assert!(out.contains("\"keep\""));
        let missing = BlockName::parse("gone").unwrap();
        assert!(remove_entry_named(text, parent.braces(), &EVENT_MAP, &missing).unwrap().is_none());
    }
}
