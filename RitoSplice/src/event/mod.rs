//! Animation event editing
//!
//! Events are entries of a clip's `mEventDataMap`. Every lookup is scoped
//! to one clip: event names are only unique within their clip, and the same
//! name often appears in several sibling clips.

mod types;

pub use types::{
    Event, EventData, FaceTargetEvent, ParticleEvent, SoundEvent, SubmeshVisibilityEvent,
};

use regex::Regex;

use crate::config::Layout;
use crate::error::{Error, Result};
use crate::text::keywords::{CLIP_TYPES, EVENT_TYPES};
use crate::text::map_edit::EVENT_MAP;
use crate::text::scan::{body_lines, brace_delta};
use crate::text::splice::remove_lines;
use crate::text::{
    BlockName, BlockSpan, add_entry, list_entries, remove_entry_named, require,
};

/// An event found in a clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub name: BlockName,
    pub type_name: String,
}

fn clip_span(text: &str, clip: &str) -> Result<BlockSpan> {
    require(text, &BlockName::parse(clip)?, &CLIP_TYPES)
}

fn event_header() -> Result<Regex> {
    Ok(Regex::new(r#"^("[^"\n]*"|0x[0-9A-Fa-f]+)\s*=\s*([A-Za-z_]\w*)"#)?)
}

/// The events of `clip` in map order.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn list_events(text: &str, clip: &str) -> Result<Vec<EventSummary>> {
    let span = clip_span(text, clip)?;
    let header = event_header()?;
    let mut events = Vec::new();
    for entry in list_entries(text, span.braces(), &EVENT_MAP)? {
        let Some(caps) = header.captures(&entry) else {
            tracing::debug!("Skipping unrecognized event entry in {}", span.name);
            continue;
        };
        let (Some(name), Some(ty)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        events.push(EventSummary {
            name: BlockName::parse(name.as_str())?,
            type_name: ty.as_str().to_string(),
        });
    }
    Ok(events)
}

/// The entry text of event `event` in `clip`.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist.
pub fn extract_event(text: &str, clip: &str, event: &str) -> Result<Option<String>> {
    let span = clip_span(text, clip)?;
    let key = BlockName::parse(event)?;
    let key_re = Regex::new(&format!(r"^{}\s*=", key.pattern()))?;
    Ok(list_entries(text, span.braces(), &EVENT_MAP)?
        .into_iter()
        .find(|entry| key_re.is_match(entry)))
}

/// Add `event` to the `mEventDataMap` of `clip`.
///
/// The map is created when the clip has none. An existing event with the
/// same name is replaced.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist, or
/// [`Error::MapPropertyMissingAndUnsynthesizable`] for a same-line clip.
pub fn add_event(text: &str, clip: &str, event: &Event, layout: &Layout) -> Result<String> {
    add_event_entry(text, clip, &event.name, &event.to_entry_text(), layout)
}

fn add_event_entry(
    text: &str,
    clip: &str,
    name: &BlockName,
    entry: &str,
    layout: &Layout,
) -> Result<String> {
    let span = clip_span(text, clip)?;
    let text = match remove_entry_named(text, span.braces(), &EVENT_MAP, name)? {
        Some(out) => {
            tracing::debug!("Replacing event {} in clip {}", name, span.name);
            out
        }
        None => text.to_string(),
    };
    let span = clip_span(&text, clip)?;
    add_entry(&text, &span, &EVENT_MAP, entry, layout)
}

/// Remove event `event` of type `event_type` from `clip` only.
///
/// The clip's lines are scanned for `<event> = <event_type>`. A line whose
/// braces balance (`"e" = FaceTargetEventData {}`) is removed alone;
/// otherwise lines are removed until the event's braces close. A same-named
/// event in any other clip is left untouched.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the clip does not exist,
/// [`Error::EventNotFound`] when the clip has no such event, or
/// [`Error::UnbalancedBraces`] when the event never closes inside the clip.
pub fn remove_event(text: &str, event: &str, event_type: &str, clip: &str) -> Result<String> {
    let span = clip_span(text, clip)?;
    let key = BlockName::parse(event)?;
    let definition = Regex::new(&format!(
        r"^\s*{}\s*=\s*{}\b",
        key.pattern(),
        regex::escape(event_type)
    ))?;

    let lines = body_lines(text, span.open, span.close);
    let not_found = || Error::EventNotFound {
        clip: span.name.literal(),
        event: key.literal(),
    };
    let first = lines
        .iter()
        .position(|l| definition.is_match(l.text(text)))
        .ok_or_else(not_found)?;

    let mut depth = brace_delta(lines[first].text(text));
    let mut last = first;
    while depth > 0 {
        last += 1;
        let line = lines.get(last).ok_or(Error::UnbalancedBraces {
            offset: lines[first].start,
        })?;
        depth += brace_delta(line.text(text));
    }

    tracing::debug!("Removing event {} from clip {} ({} line(s))", key, span.name, last - first + 1);
    Ok(remove_lines(text, lines[first].start, lines[last].start))
}

/// Find the type of event `event` in `clip`.
///
/// # Errors
/// Returns [`Error::EventNotFound`] when the clip has no such event.
pub fn event_type_of(text: &str, clip: &str, event: &str) -> Result<String> {
    let key = BlockName::parse(event)?;
    list_events(text, clip)?
        .into_iter()
        .find(|e| e.name == key)
        .map(|e| e.type_name)
        .ok_or_else(|| Error::EventNotFound {
            clip: clip.to_string(),
            event: key.literal(),
        })
}

/// Copy event `event` from `donor_clip` in `donor` into `target_clip` in `target`.
///
/// # Errors
/// Returns [`Error::EventNotFound`] when the donor clip has no such event,
/// or [`Error::BlockNotFound`] when either clip does not exist.
pub fn port_event(
    donor: &str,
    target: &str,
    donor_clip: &str,
    target_clip: &str,
    event: &str,
    layout: &Layout,
) -> Result<String> {
    let key = BlockName::parse(event)?;
    let entry = extract_event(donor, donor_clip, event)?.ok_or_else(|| Error::EventNotFound {
        clip: donor_clip.to_string(),
        event: key.literal(),
    })?;
    add_event_entry(target, target_clip, &key, &entry, layout)
}

/// Whether `type_name` is one of the known event types.
pub fn is_event_type(type_name: &str) -> bool {
    EVENT_TYPES.contains(&type_name)
}
