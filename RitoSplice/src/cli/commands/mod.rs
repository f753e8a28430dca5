use clap::Subcommand;
use std::path::Path;
use std::str::FromStr;

use crate::clip::lists::PairKind;
use crate::config::EditorConfig;
use crate::fs::edit_file;

pub mod clips;
pub mod config;
pub mod definitions;
pub mod events;
pub mod execute;
pub mod fields;
pub mod lists;
pub mod tracks;
pub mod vfx;

pub use definitions::{
    ClipCommands, ConfigCommands, EventCommands, FieldCommands, ListCommands, MaskCommands,
    TrackCommands, VfxCommands,
};

/// Pair list selector for `lists remove-pair`
#[derive(Debug, Clone, Copy)]
pub struct PairArg(pub PairKind);

impl FromStr for PairArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "selector" | "sel" => Ok(PairArg(PairKind::Selector)),
            "condition" | "cond" | "condition-float" => Ok(PairArg(PairKind::ConditionFloat)),
            _ => Err(format!(
                "Invalid pair list '{s}'. Valid values: selector/sel, condition/cond/condition-float"
            )),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Animation clip operations
    Clips {
        #[command(subcommand)]
        command: ClipCommands,
    },

    /// Animation event operations
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Set clip fields (track, mask, animation path)
    Fields {
        #[command(subcommand)]
        command: FieldCommands,
    },

    /// Clip name lists and selector/condition pairs
    Lists {
        #[command(subcommand)]
        command: ListCommands,
    },

    /// Track priority and blending
    Tracks {
        #[command(subcommand)]
        command: TrackCommands,
    },

    /// Mask weights
    Masks {
        #[command(subcommand)]
        command: MaskCommands,
    },

    /// VFX system operations
    Vfx {
        #[command(subcommand)]
        command: VfxCommands,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Apply an edit to `path`, failing when it changes nothing.
pub(crate) fn apply<F>(path: &Path, config: &EditorConfig, op: F) -> anyhow::Result<()>
where
    F: FnOnce(&str) -> crate::Result<String>,
{
    if !edit_file(path, config, op)? {
        anyhow::bail!("{} was not modified", path.display());
    }
    println!("Updated {}", path.display());
    Ok(())
}
