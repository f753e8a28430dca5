//! Animation clip operations
//!
//! Clips live in the `mClipDataMap` registry of an animation graph and come
//! in five kinds. Deleting a clip also deletes every
//! `TransitionClipBlendData` that targets it, since a transition to a clip
//! that no longer exists breaks the graph.

pub mod lists;

use std::fmt;

use regex::{Captures, Regex};

use crate::config::Layout;
use crate::error::{Error, Result};
use crate::text::keywords::{
    ATOMIC_CLIP, CLIP_DATA_MAP, CLIP_NAME, CLIP_NAME_LIST, CLIP_TYPES, CONDITION_FLOAT_CLIP,
    PARAMETRIC_CLIP, SELECTOR_CLIP, SEQUENCER_CLIP, TRANSITION_CLIP_BLEND,
};
use crate::text::scan::find_matching_close;
use crate::text::splice::{insert_before_close, remove_span};
use crate::text::{BlockName, list_blocks, locate, locate_registry};

/// The five clip type keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipKind {
    Atomic,
    Sequencer,
    Selector,
    Parametric,
    ConditionFloat,
}

impl ClipKind {
    /// The type keyword as written in the text.
    pub fn keyword(self) -> &'static str {
        match self {
            ClipKind::Atomic => ATOMIC_CLIP,
            ClipKind::Sequencer => SEQUENCER_CLIP,
            ClipKind::Selector => SELECTOR_CLIP,
            ClipKind::Parametric => PARAMETRIC_CLIP,
            ClipKind::ConditionFloat => CONDITION_FLOAT_CLIP,
        }
    }

    /// Map a type keyword back to its kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            ATOMIC_CLIP => Some(ClipKind::Atomic),
            SEQUENCER_CLIP => Some(ClipKind::Sequencer),
            SELECTOR_CLIP => Some(ClipKind::Selector),
            PARAMETRIC_CLIP => Some(ClipKind::Parametric),
            CONDITION_FLOAT_CLIP => Some(ClipKind::ConditionFloat),
            _ => None,
        }
    }
}

impl fmt::Display for ClipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A clip found in the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSummary {
    pub name: BlockName,
    pub kind: ClipKind,
}

/// Every clip in document order.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] for malformed text.
pub fn list_clips(text: &str) -> Result<Vec<ClipSummary>> {
    Ok(list_blocks(text, &CLIP_TYPES)?
        .into_iter()
        .filter_map(|span| {
            ClipKind::from_keyword(&span.type_name).map(|kind| ClipSummary { name: span.name, kind })
        })
        .collect())
}

/// The full text of clip `name`, from its name through its closing brace.
///
/// Returns `None` (and logs a warning) when the clip does not exist.
///
/// # Errors
/// Returns [`Error::InvalidName`] or [`Error::UnbalancedBraces`].
pub fn extract_clip(text: &str, name: &str) -> Result<Option<String>> {
    let name = BlockName::parse(name)?;
    match locate(text, &name, &CLIP_TYPES)? {
        Some(span) => Ok(Some(span.slice(text).to_string())),
        None => {
            tracing::warn!("Clip {} not found", name);
            Ok(None)
        }
    }
}

/// Delete clip `name` and every transition that targets it.
///
/// A missing clip is not an error: the text comes back unchanged and a
/// warning is logged, so callers should compare before writing.
///
/// # Errors
/// Returns [`Error::InvalidName`] or [`Error::UnbalancedBraces`].
pub fn delete_clip(text: &str, name: &str) -> Result<String> {
    let name = BlockName::parse(name)?;
    let Some(out) = remove_clip_block(text, &name)? else {
        tracing::warn!("Clip {} not found, nothing deleted", name);
        return Ok(text.to_string());
    };
    let (out, removed) = remove_transitions_to(&out, &name)?;
    tracing::debug!("Deleted clip {} and {} transition(s)", name, removed);
    Ok(out)
}

fn remove_clip_block(text: &str, name: &BlockName) -> Result<Option<String>> {
    Ok(locate(text, name, &CLIP_TYPES)?.map(|span| remove_span(text, span.start, span.close)))
}

/// Regex fragment matching every literal that refers to `name`.
///
/// A quoted name is also referenced by its FNV-1a hash; hex digits compare
/// case-insensitively.
fn reference_pattern(name: &BlockName) -> String {
    match name {
        BlockName::Quoted(_) => format!(
            r"(?:{}|(?i:{})\b)",
            regex::escape(&name.literal()),
            regex::escape(&name.hashed())
        ),
        BlockName::Hash(h) => format!(r"(?i:{})\b", regex::escape(h)),
    }
}

/// Remove every `TransitionClipBlendData` whose `mClipName` refers to `name`.
///
/// Returns the new text and the number of transitions removed.
fn remove_transitions_to(text: &str, name: &BlockName) -> Result<(String, usize)> {
    let anchor = Regex::new(&format!(
        r#"(?:\b0x[0-9A-Fa-f]+|\b\d+|"[^"\n]*")\s*=\s*{}\s*\{{"#,
        TRANSITION_CLIP_BLEND
    ))?;
    let target = Regex::new(&format!(
        r"{}\s*:\s*hash\s*=\s*{}",
        CLIP_NAME,
        reference_pattern(name)
    ))?;

    let mut doomed = Vec::new();
    for m in anchor.find_iter(text) {
        let close = find_matching_close(text, m.end() - 1)?;
        if target.is_match(&text[m.start()..=close]) {
            doomed.push((m.start(), close));
        }
    }

    let mut out = text.to_string();
    for &(start, close) in doomed.iter().rev() {
        out = remove_span(&out, start, close);
    }
    Ok((out, doomed.len()))
}

/// Insert a full clip block into the `mClipDataMap` registry.
///
/// The clip is placed before the registry's closing brace at the configured
/// clip indentation.
///
/// # Errors
/// Returns [`Error::ParentMapNotFound`] when the text has no `mClipDataMap`,
/// or [`Error::InvalidValue`] for an empty clip text.
pub fn insert_clip(text: &str, clip_text: &str, layout: &Layout) -> Result<String> {
    if clip_text.trim().is_empty() {
        return Err(Error::InvalidValue { field: "clip text".to_string(), value: String::new() });
    }
    let registry = locate_registry(text, CLIP_DATA_MAP)?;
    let indent = " ".repeat(layout.clip_indent);
    Ok(insert_before_close(
        text,
        registry.braces(),
        clip_text,
        &indent,
        &registry.indent,
    ))
}

/// Rename clip `old` to `new`, along with every reference to it.
///
/// References are `mClipName: hash = <old>` fields (transitions, selector
/// and condition pairs) and `mClipNameList` entries written in the same
/// literal form as the declaration.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when `old` does not exist.
pub fn rename_clip(text: &str, old: &str, new: &str) -> Result<String> {
    let old = BlockName::parse(old)?;
    let new = BlockName::parse(new)?;
    let span = locate(text, &old, &CLIP_TYPES)?
        .ok_or_else(|| Error::block_not_found(&old.literal(), &CLIP_TYPES))?;
    if locate(text, &new, &CLIP_TYPES)?.is_some() {
        tracing::warn!("Clip {} already exists, renaming {} anyway", new, old);
    }

    let old_literal = old.literal();
    let new_literal = new.literal();

    let mut out = String::with_capacity(text.len() + new_literal.len());
    out.push_str(&text[..span.start]);
    out.push_str(&new_literal);
    out.push_str(&text[span.start + old_literal.len()..]);

    let exact = match &old {
        BlockName::Quoted(_) => regex::escape(&old_literal),
        BlockName::Hash(h) => format!(r"{}\b", regex::escape(h)),
    };
    let field = Regex::new(&format!(r"({}\s*:\s*hash\s*=\s*){}", CLIP_NAME, exact))?;
    let out = field
        .replace_all(&out, |caps: &Captures| format!("{}{}", &caps[1], new_literal))
        .into_owned();

    let out = rename_list_entries(&out, &exact, &new_literal)?;
    tracing::debug!("Renamed clip {} to {}", old, new);
    Ok(out)
}

/// Rewrite `mClipNameList` entries matching `exact` to `replacement`.
fn rename_list_entries(text: &str, exact: &str, replacement: &str) -> Result<String> {
    let list = Regex::new(&format!(r"{}\s*:\s*list\[hash\]\s*=\s*\{{", CLIP_NAME_LIST))?;
    let entry = Regex::new(&format!(r"(?m)^([ \t]*){exact}([ \t]*\r?)$"))?;

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in list.find_iter(text) {
        let open = m.end() - 1;
        if open < cursor {
            continue;
        }
        let close = find_matching_close(text, open)?;
        out.push_str(&text[cursor..=open]);
        let body = &text[open + 1..close];
        out.push_str(&entry.replace_all(body, |caps: &Captures| {
            format!("{}{}{}", &caps[1], replacement, &caps[2])
        }));
        cursor = close;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Copy clip `name` from `donor` into `target`.
///
/// An existing clip of the same name in the target is replaced; transitions
/// that target it are kept.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the donor has no such clip, or
/// [`Error::ParentMapNotFound`] when the target has no `mClipDataMap`.
pub fn port_clip(donor: &str, target: &str, name: &str, layout: &Layout) -> Result<String> {
    let parsed = BlockName::parse(name)?;
    let clip_text = locate(donor, &parsed, &CLIP_TYPES)?
        .map(|span| span.slice(donor).to_string())
        .ok_or_else(|| Error::block_not_found(&parsed.literal(), &CLIP_TYPES))?;

    let target = match remove_clip_block(target, &parsed)? {
        Some(out) => {
            tracing::debug!("Replacing existing clip {} in target", parsed);
            out
        }
        None => target.to_string(),
    };
    insert_clip(&target, &clip_text, layout)
}
