//! Track and mask editing
//!
//! Clips point at a `TrackData` (priority and blending) through
//! `mTrackDataName` and optionally at a `MaskData` (per-joint weights)
//! through `mMaskDataName`.

use crate::config::Layout;
use crate::error::{Error, Result};
use crate::text::keywords::{
    BLEND_MODE, BLEND_WEIGHT, CLIP_TYPES, MASK_DATA, MASK_DATA_NAME, PRIORITY, TRACK_DATA,
    TRACK_DATA_MAP, TRACK_DATA_NAME, WEIGHT_LIST,
};
use crate::text::map_edit::{MASK_WEIGHTS, append_child};
use crate::text::name::format_f32;
use crate::text::scan::line_break_at;
use crate::text::splice::{insert_before_close, remove_span, with_line_break};
use crate::text::{
    BlockName, BlockSpan, Field, format_name_value, get_scalar_field, list_entries, locate,
    locate_property, locate_registry, require, set_name_field, set_scalar_field,
    set_scalar_field_after,
};

/// Point clip `clip` at track `track` (`mTrackDataName`).
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn set_clip_track(text: &str, clip: &str, track: &str, layout: &Layout) -> Result<String> {
    let span = require(text, &BlockName::parse(clip)?, &CLIP_TYPES)?;
    set_name_field(text, &span, TRACK_DATA_NAME, "hash", track, layout)
}

/// Point clip `clip` at mask `mask` (`mMaskDataName`).
///
/// A new field goes right after `mTrackDataName` when the clip has one.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn set_clip_mask(text: &str, clip: &str, mask: &str, layout: &Layout) -> Result<String> {
    let span = require(text, &BlockName::parse(clip)?, &CLIP_TYPES)?;
    let value = format_name_value(mask);
    let field = Field { name: MASK_DATA_NAME, ty: "hash", value: &value };
    set_scalar_field_after(text, &span, field, TRACK_DATA_NAME, layout)
}

/// Priority and blending of a `TrackData`; `None` fields are left alone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackSettings {
    pub priority: Option<u8>,
    pub blend_mode: Option<u8>,
    pub blend_weight: Option<f32>,
}

impl TrackSettings {
    fn is_empty(&self) -> bool {
        self.priority.is_none() && self.blend_mode.is_none() && self.blend_weight.is_none()
    }

    fn field_values(&self) -> Vec<(&'static str, &'static str, String)> {
        let mut fields = Vec::new();
        if let Some(p) = self.priority {
            fields.push((PRIORITY, "u8", p.to_string()));
        }
        if let Some(m) = self.blend_mode {
            fields.push((BLEND_MODE, "u8", m.to_string()));
        }
        if let Some(w) = self.blend_weight {
            fields.push((BLEND_WEIGHT, "f32", format_f32(w)));
        }
        fields
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|value| {
        value.parse().map_err(|_| Error::InvalidValue { field: field.to_string(), value })
    })
    .transpose()
}

fn track_span(text: &str, track: &str) -> Result<BlockSpan> {
    require(text, &BlockName::parse(track)?, &[TRACK_DATA])
}

/// Read the settings of track `track`; absent fields are `None`.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] or [`Error::InvalidValue`].
pub fn track_settings(text: &str, track: &str) -> Result<TrackSettings> {
    let braces = track_span(text, track)?.braces();
    Ok(TrackSettings {
        priority: parse_field(PRIORITY, get_scalar_field(text, braces, PRIORITY)?)?,
        blend_mode: parse_field(BLEND_MODE, get_scalar_field(text, braces, BLEND_MODE)?)?,
        blend_weight: parse_field(BLEND_WEIGHT, get_scalar_field(text, braces, BLEND_WEIGHT)?)?,
    })
}

/// Apply `settings` to track `track`.
///
/// A missing track is created inside `mTrackDataMap` with just the set
/// fields.
///
/// # Errors
/// Returns [`Error::ParentMapNotFound`] when the track is missing and the
/// text has no `mTrackDataMap`.
pub fn set_track(
    text: &str,
    track: &str,
    settings: &TrackSettings,
    layout: &Layout,
) -> Result<String> {
    let name = BlockName::parse(track)?;
    if locate(text, &name, &[TRACK_DATA])?.is_none() {
        return insert_track(text, &name, settings, layout);
    }

    let mut out = text.to_string();
    for (field, ty, value) in settings.field_values() {
        let span = require(&out, &name, &[TRACK_DATA])?;
        out = set_scalar_field(&out, &span, Field { name: field, ty, value: &value }, layout)?;
    }
    Ok(out)
}

fn insert_track(
    text: &str,
    name: &BlockName,
    settings: &TrackSettings,
    layout: &Layout,
) -> Result<String> {
    let registry = locate_registry(text, TRACK_DATA_MAP)?;
    let entry = if settings.is_empty() {
        format!("{name} = {TRACK_DATA} {{}}")
    } else {
        let mut entry = format!("{name} = {TRACK_DATA} {{\n");
        for (field, ty, value) in settings.field_values() {
            entry.push_str(&format!("{}{field}: {ty} = {value}\n", layout.unit()));
        }
        entry.push('}');
        entry
    };
    tracing::debug!("Creating track {}", name);
    Ok(insert_before_close(
        text,
        registry.braces(),
        &entry,
        &layout.deeper(&registry.indent),
        &registry.indent,
    ))
}

/// Delete track `track`.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the track does not exist.
pub fn delete_track(text: &str, track: &str) -> Result<String> {
    let span = track_span(text, track)?;
    Ok(remove_span(text, span.start, span.close))
}

fn mask_span(text: &str, mask: &str) -> Result<BlockSpan> {
    require(text, &BlockName::parse(mask)?, &[MASK_DATA])
}

/// The `mWeightList` of mask `mask`.
///
/// Weights may be written one per line or several per line.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] or [`Error::InvalidValue`].
pub fn mask_weights(text: &str, mask: &str) -> Result<Vec<f32>> {
    let span = mask_span(text, mask)?;
    let Some(list) = locate_property(text, span.braces(), WEIGHT_LIST)? else {
        return Ok(Vec::new());
    };
    let inline = text[list.open + 1..list.close].trim();
    let entries = if inline.contains('\n') {
        list_entries(text, span.braces(), &MASK_WEIGHTS)?
    } else {
        vec![inline.to_string()]
    };

    entries
        .iter()
        .flat_map(|line| line.split(|c: char| c.is_whitespace() || c == ','))
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f32>().map_err(|_| Error::InvalidValue {
                field: WEIGHT_LIST.to_string(),
                value: token.to_string(),
            })
        })
        .collect()
}

/// Replace the `mWeightList` of mask `mask`, one weight per line.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the mask does not exist.
pub fn set_mask_weights(text: &str, mask: &str, weights: &[f32], layout: &Layout) -> Result<String> {
    let span = mask_span(text, mask)?;
    let render = |indent: &str| {
        if weights.is_empty() {
            return format!("{indent}{WEIGHT_LIST}: list[f32] = {{}}");
        }
        let inner = layout.deeper(indent);
        let body: Vec<String> = weights.iter().map(|w| format!("{inner}{}", format_f32(*w))).collect();
        format!("{indent}{WEIGHT_LIST}: list[f32] = {{\n{}\n{indent}}}", body.join("\n"))
    };

    match locate_property(text, span.braces(), WEIGHT_LIST)? {
        Some(list) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..list.line_start]);
            let eol = line_break_at(text, list.line_start);
            out.push_str(&with_line_break(&render(&list.indent), eol));
            out.push_str(&text[list.close + 1..]);
            Ok(out)
        }
        None => append_child(
            text,
            span.braces(),
            span.indent(text),
            &span.name.literal(),
            WEIGHT_LIST,
            layout,
            render,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GRAPH: &str = "    mClipDataMap: map[hash,pointer] = {
            \"Run\" = AtomicClipData {
                mFlags: u32 = 1
                mTrackDataName: hash = \"Default\"
                mAnimationResourceData: embed = AnimationResourceData {
                    mAnimationFilePath: string = \"run.anm\"
                }
            }
    }
    mTrackDataMap: map[hash,embed] = {
        \"Default\" = TrackData {
            mPriority: u8 = 1
        }
    }
    mMaskDataMap: map[hash,embed] = {
        \"Upper\" = MaskData {
            mId: u32 = 2
            mWeightList: list[f32] = {
                0
                0.5
                1
            }
        }
    }
";

    #[test]
    fn test_set_clip_track_formats_value() {
        let out = set_clip_track(GRAPH, "Run", "Upper", &Layout::default()).unwrap();
        assert!(out.contains("                mTrackDataName: hash = \"Upper\"\n"));
        let out = set_clip_track(GRAPH, "Run", "0xABCDEF01", &Layout::default()).unwrap();
        assert!(out.contains("mTrackDataName: hash = 0xABCDEF01\n"));
        assert!(!out.contains("\"0xABCDEF01\""));
    }

    #[test]
    fn test_set_clip_mask_after_track_name() {
        let out = set_clip_mask(GRAPH, "Run", "Upper", &Layout::default()).unwrap();
        assert!(out.contains(
            "                mTrackDataName: hash = \"Default\"\n                mMaskDataName: hash = \"Upper\"\n                mAnimationResourceData"
        ));
        let again = set_clip_mask(&out, "Run", "Lower", &Layout::default()).unwrap();
        assert_eq!(again, out.replace("mMaskDataName: hash = \"Upper\"", "mMaskDataName: hash = \"Lower\""));
    }

    #[test]
    fn test_track_settings_roundtrip() {
        let settings = TrackSettings {
            blend_mode: Some(1),
            blend_weight: Some(0.75),
            ..Default::default()
        };
        let out = set_track(GRAPH, "Default", &settings, &Layout::default()).unwrap();
        assert_eq!(
            track_settings(&out, "Default").unwrap(),
            TrackSettings { priority: Some(1), blend_mode: Some(1), blend_weight: Some(0.75) }
        );
    }

    #[test]
    fn test_set_track_creates_missing_track() {
        let settings = TrackSettings { priority: Some(3), ..Default::default() };
        let out = set_track(GRAPH, "Upper", &settings, &Layout::default()).unwrap();
        assert!(out.contains(
            "        \"Upper\" = TrackData {\n            mPriority: u8 = 3\n        }\n    }\n    mMaskDataMap"
        ));
        let out = set_track(GRAPH, "Empty", &TrackSettings::default(), &Layout::default()).unwrap();
        assert!(out.contains("        \"Empty\" = TrackData {}\n"));
    }

    #[test]
    fn test_delete_track() {
        let out = delete_track(GRAPH, "Default").unwrap();
        assert!(out.contains("    mTrackDataMap: map[hash,embed] = {\n    }\n"));
        assert!(matches!(delete_track(&out, "Default"), Err(Error::BlockNotFound { .. })));
    }

    #[test]
    fn test_mask_weights() {
        assert_eq!(mask_weights(GRAPH, "Upper").unwrap(), vec![0.0, 0.5, 1.0]);

        let out = set_mask_weights(GRAPH, "Upper", &[1.0, 0.25], &Layout::default()).unwrap();
        assert!(out.contains("            mWeightList: list[f32] = {\n                1\n                0.25\n            }\n"));
        assert_eq!(mask_weights(&out, "Upper").unwrap(), vec![1.0, 0.25]);

        let inline = GRAPH.replace("{\n                0\n                0.5\n                1\n            }", "{ 0 0.5 }");
        assert_eq!(mask_weights(&inline, "Upper").unwrap(), vec![0.0, 0.5]);

        let empty = GRAPH.replace("{\n                0\n                0.5\n                1\n            }", "{}");
        assert!(mask_weights(&empty, "Upper").unwrap().is_empty());
    }

    #[test]
    fn test_crlf_edits_keep_line_breaks() {
        let crlf = GRAPH.replace('\n', "\r\n");
        let layout = Layout::default();
        let out = set_clip_track(&crlf, "Run", "X", &layout).unwrap();
        let out = set_clip_mask(&out, "Run", "Upper", &layout).unwrap();
        let out = set_track(&out, "Lower", &TrackSettings { priority: Some(2), ..Default::default() }, &layout)
            .unwrap();
        let out = set_mask_weights(&out, "Upper", &[0.5, 1.0], &layout).unwrap();
        assert!(out.contains("mTrackDataName: hash = \"X\"\r\n"));
        assert!(out.contains("mMaskDataName: hash = \"Upper\"\r\n"));
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
        assert_eq!(mask_weights(&out, "Upper").unwrap(), vec![0.5, 1.0]);
    }

    #[test]
    fn test_set_mask_weights_creates_list() {
        let text = "\"Lower\" = MaskData {\n    mId: u32 = 3\n}\n";
        let out = set_mask_weights(text, "Lower", &[0.5], &Layout::default()).unwrap();
        assert_eq!(
            out,
            "\"Lower\" = MaskData {\n    mId: u32 = 3\n    mWeightList: list[f32] = {\n        0.5\n    }\n}\n"
        );
    }

    #[test]
    fn test_invalid_weight() {
        let text = "\"Bad\" = MaskData {\n    mWeightList: list[f32] = {\n        oops\n    }\n}\n";
        assert!(matches!(mask_weights(text, "Bad"), Err(Error::InvalidValue { .. })));
    }
}
