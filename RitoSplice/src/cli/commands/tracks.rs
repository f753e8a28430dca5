//! CLI commands for tracks and masks

use std::path::Path;

use crate::config::EditorConfig;
use crate::fs::read_text;
use crate::track::{TrackSettings, delete_track, mask_weights, set_mask_weights, set_track};

use super::apply;

/// Apply track settings
pub fn set(file: &Path, track: &str, settings: &TrackSettings, config: &EditorConfig) -> anyhow::Result<()> {
    if *settings == TrackSettings::default() {
        anyhow::bail!("Nothing to set: pass --priority, --blend-mode or --blend-weight");
    }
    apply(file, config, |text| set_track(text, track, settings, &config.layout))
}

/// Delete a track
pub fn delete(file: &Path, track: &str, config: &EditorConfig) -> anyhow::Result<()> {
    apply(file, config, |text| delete_track(text, track))
}

/// Print or replace mask weights
pub fn weights(
    file: &Path,
    mask: &str,
    set: Option<&[f32]>,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    match set {
        Some(weights) => apply(file, config, |text| {
            set_mask_weights(text, mask, weights, &config.layout)
        }),
        None => {
            let text = read_text(file)?;
            let weights = mask_weights(&text, mask)?;
            for (i, w) in weights.iter().enumerate() {
                println!("{i:>4}  {w}");
            }
            println!("{} weight(s)", weights.len());
            Ok(())
        }
    }
}
