//! CLI commands for clip lists

use std::path::Path;

use crate::clip::lists::{
    PairKind, add_clip_name as add_name, add_condition_float_pair,
    add_selector_pair as add_selector,
    remove_clip_name as remove_name, remove_pair as remove_pair_at,
};
use crate::config::EditorConfig;

use super::apply;

/// Append to `mClipNameList`
pub fn add_clip_name(file: &Path, clip: &str, name: &str, config: &EditorConfig) -> anyhow::Result<()> {
    apply(file, config, |text| add_name(text, clip, name, &config.layout))
}

/// Remove from `mClipNameList`
pub fn remove_clip_name(file: &Path, clip: &str, name: &str, config: &EditorConfig) -> anyhow::Result<()> {
    apply(file, config, |text| remove_name(text, clip, name))
}

/// Append a selector pair
pub fn add_selector_pair(
    file: &Path,
    clip: &str,
    target: &str,
    probability: f32,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    apply(file, config, |text| {
        add_selector(text, clip, target, probability, &config.layout)
    })
}

/// Append a condition-float pair
pub fn add_condition_pair(
    file: &Path,
    clip: &str,
    target: &str,
    value: f32,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    apply(file, config, |text| {
        add_condition_float_pair(text, clip, target, value, &config.layout)
    })
}

/// Remove a pair by index
pub fn remove_pair(
    file: &Path,
    clip: &str,
    kind: PairKind,
    index: usize,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    apply(file, config, |text| remove_pair_at(text, clip, kind, index))
}
