//! CLI commands for clip fields

use std::path::Path;

use crate::clip::ClipKind;
use crate::config::EditorConfig;
use crate::text::keywords::CLIP_TYPES;
use crate::text::{BlockName, require, set_animation_file_path};
use crate::track::{set_clip_mask, set_clip_track};

use super::apply;

/// Set a clip's track
pub fn track(file: &Path, clip: &str, value: &str, config: &EditorConfig) -> anyhow::Result<()> {
    apply(file, config, |text| set_clip_track(text, clip, value, &config.layout))
}

/// Set a clip's mask
pub fn mask(file: &Path, clip: &str, value: &str, config: &EditorConfig) -> anyhow::Result<()> {
    apply(file, config, |text| set_clip_mask(text, clip, value, &config.layout))
}

/// Set a clip's animation file path
pub fn anim_path(file: &Path, clip: &str, value: &str, config: &EditorConfig) -> anyhow::Result<()> {
    apply(file, config, |text| {
        let span = require(text, &BlockName::parse(clip)?, &CLIP_TYPES)?;
        if ClipKind::from_keyword(&span.type_name) != Some(ClipKind::Atomic) {
            tracing::warn!("{} is a {}, animation paths belong on atomic clips", span.name, span.type_name);
        }
        set_animation_file_path(text, &span, value, &config.layout)
    })
}
