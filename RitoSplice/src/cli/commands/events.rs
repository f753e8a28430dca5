//! CLI commands for animation events

use std::path::Path;

use crate::config::EditorConfig;
use crate::event::{event_type_of, list_events, port_event, remove_event};
use crate::fs::read_text;

use super::apply;

/// List the events of a clip
pub fn list(file: &Path, clip: &str) -> anyhow::Result<()> {
    let text = read_text(file)?;
    let events = list_events(&text, clip)?;
    if events.is_empty() {
        println!("Clip {clip} has no events");
        return Ok(());
    }
    for event in &events {
        println!("{:<28} {}", event.type_name, event.name);
    }
    Ok(())
}

/// Remove one event from one clip
///
/// Without an explicit type the event's own type is looked up first.
pub fn remove(
    file: &Path,
    clip: &str,
    event: &str,
    event_type: Option<&str>,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    apply(file, config, |text| {
        let event_type = match event_type {
            Some(t) => t.to_string(),
            None => event_type_of(text, clip, event)?,
        };
        remove_event(text, event, &event_type, clip)
    })
}

/// Port an event between clips of two files
pub fn port(
    donor: &Path,
    target: &Path,
    event: &str,
    from: &str,
    to: &str,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    let donor_text = read_text(donor)?;
    apply(target, config, |text| {
        port_event(&donor_text, text, from, to, event, &config.layout)
    })
}
