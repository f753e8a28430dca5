//! Scalar field editing
//!
//! Sets `key: type = value` lines directly inside a block: an existing line
//! keeps everything up to the `=` and gets the new value, a missing line is
//! inserted with the indentation of its siblings.

use regex::Regex;

use super::keywords::{ANIMATION_FILE_PATH, ANIMATION_RESOURCE, ANIMATION_RESOURCE_DATA};
use super::locate::{BlockSpan, Braces, locate_property};
use super::map_edit::{append_child, sibling_indent};
use super::name::format_name_value;
use super::scan::{BodyLine, body_entries, body_lines, brace_delta, indent_of, line_start};
use super::splice::{insert_line_after, replace_line};
use crate::config::Layout;
use crate::error::{Error, Result};

/// A scalar field to set: name, declared type, and already formatted value.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'a str,
    pub ty: &'a str,
    pub value: &'a str,
}

fn field_regex(name: &str, ty: Option<&str>) -> Result<Regex> {
    let ty = ty.map_or_else(|| r"[^=\n]*?".to_string(), regex::escape);
    Ok(Regex::new(&format!(
        r"^([ \t]*{}\s*:\s*{}\s*=\s*)(.*?)\s*$",
        regex::escape(name),
        ty
    ))?)
}

/// The direct-child line declaring `name` (with type `ty`, if given).
fn find_field_line(
    text: &str,
    lines: &[BodyLine],
    name: &str,
    ty: Option<&str>,
) -> Result<Option<BodyLine>> {
    let re = field_regex(name, ty)?;
    Ok(lines
        .iter()
        .find(|l| l.depth == 0 && re.is_match(l.text(text)))
        .copied())
}

/// The raw value text of a direct-child scalar field, if present.
///
/// # Errors
/// Returns [`Error::InvalidRegex`] if the field name cannot form a pattern.
pub fn get_scalar_field(text: &str, block: Braces, name: &str) -> Result<Option<String>> {
    let lines = body_lines(text, block.open, block.close);
    let re = field_regex(name, None)?;
    Ok(lines
        .iter()
        .filter(|l| l.depth == 0)
        .find_map(|l| re.captures(l.text(text)))
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().to_string()))
}

/// Set a scalar field directly inside `block`.
///
/// # Errors
/// Returns [`Error::MapPropertyMissingAndUnsynthesizable`] when the field is
/// missing and the block opens and closes on one line.
pub fn set_scalar_field(
    text: &str,
    block: &BlockSpan,
    field: Field<'_>,
    layout: &Layout,
) -> Result<String> {
    set_field_in(
        text,
        block.braces(),
        block.indent(text),
        &block.name.literal(),
        field,
        None,
        layout,
    )
}

/// Set a scalar field, inserting it after `anchor` when it has to be created.
///
/// Keeps related metadata adjacent, e.g. `mMaskDataName` right after
/// `mTrackDataName`. Falls back to the top of the block when the anchor is
/// absent too.
///
/// # Errors
/// Same as [`set_scalar_field`].
pub fn set_scalar_field_after(
    text: &str,
    block: &BlockSpan,
    field: Field<'_>,
    anchor: &str,
    layout: &Layout,
) -> Result<String> {
    set_field_in(
        text,
        block.braces(),
        block.indent(text),
        &block.name.literal(),
        field,
        Some(anchor),
        layout,
    )
}

/// Set a name-, hash- or path-typed field from a raw caller value.
///
/// The value goes through [`format_name_value`].
///
/// # Errors
/// Same as [`set_scalar_field`].
pub fn set_name_field(
    text: &str,
    block: &BlockSpan,
    name: &str,
    ty: &str,
    raw: &str,
    layout: &Layout,
) -> Result<String> {
    let value = format_name_value(raw);
    set_scalar_field(text, block, Field { name, ty, value: &value }, layout)
}

fn set_field_in(
    text: &str,
    block: Braces,
    block_indent: &str,
    block_label: &str,
    field: Field<'_>,
    anchor: Option<&str>,
    layout: &Layout,
) -> Result<String> {
    let lines = body_lines(text, block.open, block.close);

    if let Some(line) = find_field_line(text, &lines, field.name, Some(field.ty))? {
        let current = line.text(text);
        if brace_delta(current) == 0 {
            let re = field_regex(field.name, Some(field.ty))?;
            if let Some(prefix) = re.captures(current).and_then(|c| c.get(1)) {
                let replaced = format!("{}{}", prefix.as_str(), field.value);
                return Ok(replace_line(text, line.start, &replaced));
            }
        }
    }

    if line_start(text, block.open) == line_start(text, block.close) {
        return Err(Error::MapPropertyMissingAndUnsynthesizable {
            property: field.name.to_string(),
            block: block_label.to_string(),
        });
    }

    let anchor_line = match anchor {
        Some(anchor) => find_field_line(text, &lines, anchor, None)?,
        None => None,
    };
    if let Some(anchor_line) = anchor_line {
        let index = lines.iter().position(|l| *l == anchor_line).unwrap_or_default();
        let last = body_entries(text, &lines)
            .into_iter()
            .find(|e| e.first == index)
            .map_or(anchor_line, |e| lines[e.last]);
        let indent = indent_of(anchor_line.text(text));
        let line = format!("{indent}{}: {} = {}", field.name, field.ty, field.value);
        return Ok(insert_line_after(text, last.start, &line));
    }

    let indent = sibling_indent(text, &lines, block_indent, layout);
    let line = format!("{indent}{}: {} = {}", field.name, field.ty, field.value);
    Ok(insert_line_after(text, block.open, &line))
}

/// Set a clip's animation file path.
///
/// Edits `mAnimationFilePath` in place whether it is a direct field of the
/// clip or nested in `mAnimationResourceData`. When neither exists the
/// nested wrapper is created.
///
/// # Errors
/// Returns [`Error::MapPropertyMissingAndUnsynthesizable`] for a same-line
/// clip body.
pub fn set_animation_file_path(
    text: &str,
    clip: &BlockSpan,
    raw_path: &str,
    layout: &Layout,
) -> Result<String> {
    let value = format_name_value(raw_path);
    let field = Field { name: ANIMATION_FILE_PATH, ty: "string", value: &value };

    let lines = body_lines(text, clip.open, clip.close);
    if find_field_line(text, &lines, ANIMATION_FILE_PATH, None)?.is_some() {
        return set_scalar_field(text, clip, field, layout);
    }

    if let Some(wrapper) = locate_property(text, clip.braces(), ANIMATION_RESOURCE_DATA)? {
        return set_field_in(
            text,
            wrapper.braces(),
            &wrapper.indent,
            ANIMATION_RESOURCE_DATA,
            field,
            None,
            layout,
        );
    }

    tracing::debug!("Creating {} inside {}", ANIMATION_RESOURCE_DATA, clip.name);
    append_child(
        text,
        clip.braces(),
        clip.indent(text),
        &clip.name.literal(),
        ANIMATION_RESOURCE_DATA,
        layout,
        |indent| {
            format!(
                "{indent}{ANIMATION_RESOURCE_DATA}: embed = {ANIMATION_RESOURCE} {{\n{}{ANIMATION_FILE_PATH}: string = {value}\n{indent}}}",
                layout.deeper(indent)
            )
        },
    )
}

/// The clip's animation file path from either the direct or nested form.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] for malformed text.
pub fn animation_file_path(text: &str, clip: &BlockSpan) -> Result<Option<String>> {
    if let Some(value) = get_scalar_field(text, clip.braces(), ANIMATION_FILE_PATH)? {
        return Ok(Some(value));
    }
    match locate_property(text, clip.braces(), ANIMATION_RESOURCE_DATA)? {
        Some(wrapper) => get_scalar_field(text, wrapper.braces(), ANIMATION_FILE_PATH),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::keywords::{CLIP_TYPES, MASK_DATA_NAME, TRACK_DATA_NAME};
    use crate::text::locate::require;
    use crate::text::name::BlockName;
    use pretty_assertions::assert_eq;

    fn clip(text: &str, name: &str) -> BlockSpan {
        require(text, &BlockName::parse(name).unwrap(), &CLIP_TYPES).unwrap()
    }

    const RUN: &str = "    \"Run\" = AtomicClipData {
        mFlags: u32 = 1
        mTrackDataName: hash = \"Default\"
        mEventDataMap: map[hash,pointer] = {
            \"e\" = SoundEventData {}
        }
    }
";

    #[test]
    fn test_replace_existing_field_keeps_indent() {
        let block = clip(RUN, "Run");
        let out = set_name_field(RUN, &block, TRACK_DATA_NAME, "hash", "Upper", &Layout::default())
            .unwrap();
        assert_eq!(out, RUN.replace("\"Default\"", "\"Upper\""));
    }

    #[test]
    fn test_hash_values_are_never_quoted() {
        let block = clip(RUN, "Run");
        let out = set_name_field(RUN, &block, TRACK_DATA_NAME, "hash", "0xABCDEF01", &Layout::default())
            .unwrap();
        assert!(out.contains("mTrackDataName: hash = 0xABCDEF01\n"));
        assert!(!out.contains("\"0xABCDEF01\""));
    }

    #[test]
    fn test_insert_missing_field_at_top() {
        let text = "\"Idle\" = AtomicClipData {\n    mFlags: u32 = 1\n}\n";
        let block = clip(text, "Idle");
        let out = set_name_field(text, &block, TRACK_DATA_NAME, "hash", "Base", &Layout::default())
            .unwrap();
        assert_eq!(
            out,
            "\"Idle\" = AtomicClipData {\n    mTrackDataName: hash = \"Base\"\n    mFlags: u32 = 1\n}\n"
        );
    }

    #[test]
    fn test_insert_after_anchor() {
        let block = clip(RUN, "Run");
        let field = Field { name: MASK_DATA_NAME, ty: "hash", value: "\"Legs\"" };
        let out = set_scalar_field_after(RUN, &block, field, TRACK_DATA_NAME, &Layout::default())
            .unwrap();
        assert!(out.contains(
            "        mTrackDataName: hash = \"Default\"\n        mMaskDataName: hash = \"Legs\"\n"
        ));
    }

    #[test]
    fn test_missing_field_in_same_line_block() {
        let text = "\"Idle\" = AtomicClipData {}\n";
        let block = clip(text, "Idle");
        let err = set_name_field(text, &block, TRACK_DATA_NAME, "hash", "Base", &Layout::default())
            .unwrap_err();
        assert!(matches!(err, Error::MapPropertyMissingAndUnsynthesizable { .. }));
    }

    #[test]
    fn test_nested_fields_are_not_direct_fields() {
        let text = "\"Idle\" = AtomicClipData {
    mEventDataMap: map[hash,pointer] = {
        \"e\" = ParticleEventData {
            mStartFrame: f32 = 1
        }
    }
}
";
        let block = clip(text, "Idle");
        assert_eq!(get_scalar_field(text, block.braces(), "mStartFrame").unwrap(), None);
    }

    #[test]
    fn test_animation_path_direct_form() {
        let text = "\"Idle\" = AtomicClipData {\n    mAnimationFilePath: string = \"old.anm\"\n}\n";
        let block = clip(text, "Idle");
        let out = set_animation_file_path(text, &block, "new.anm", &Layout::default()).unwrap();
        assert_eq!(out, "\"Idle\" = AtomicClipData {\n    mAnimationFilePath: string = \"new.anm\"\n}\n");
    }

    #[test]
    fn test_animation_path_nested_form() {
        let text = "\"Idle\" = AtomicClipData {
    mAnimationResourceData: embed = AnimationResourceData {
        mAnimationFilePath: string = \"old.anm\"
    }
}
";
        let block = clip(text, "Idle");
        let out = set_animation_file_path(text, &block, "new.anm", &Layout::default()).unwrap();
        assert_eq!(out, text.replace("old.anm", "new.anm"));
        let block = clip(&out, "Idle");
        assert_eq!(animation_file_path(&out, &block).unwrap().as_deref(), Some("\"new.anm\""));
    }

    #[test]
    fn test_animation_path_synthesizes_wrapper() {
        let block = clip(RUN, "Run");
        let out = set_animation_file_path(RUN, &block, "run.anm", &Layout::default()).unwrap();
        assert_eq!(
            out,
            "    \"Run\" = AtomicClipData {
        mFlags: u32 = 1
        mTrackDataName: hash = \"Default\"
        mEventDataMap: map[hash,pointer] = {
            \"e\" = SoundEventData {}
        }
        mAnimationResourceData: embed = AnimationResourceData {
            mAnimationFilePath: string = \"run.anm\"
        }
    }
"
        );
    }
}
