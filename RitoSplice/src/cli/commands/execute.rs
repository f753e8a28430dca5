//! Command execution implementations

use std::path::Path;

use super::Commands;
use super::definitions::{
    ClipCommands, ConfigCommands, EventCommands, FieldCommands, ListCommands, MaskCommands,
    TrackCommands, VfxCommands,
};
use super::{clips, config, events, fields, lists, tracks, vfx};
use crate::config::EditorConfig;
use crate::track::TrackSettings;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the config cannot be loaded or the command fails.
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<()> {
        if let Commands::Config { command } = self {
            return command.execute(config_path);
        }

        let config = EditorConfig::load_or_default(config_path)?;
        match self {
            Commands::Clips { command } => command.execute(&config),
            Commands::Events { command } => command.execute(&config),
            Commands::Fields { command } => command.execute(&config),
            Commands::Lists { command } => command.execute(&config),
            Commands::Tracks { command } => command.execute(&config),
            Commands::Masks { command } => command.execute(&config),
            Commands::Vfx { command } => command.execute(&config),
            Commands::Config { .. } => Ok(()),
        }
    }
}

impl ClipCommands {
    /// Execute the selected clip command.
    ///
    /// # Errors
    /// Returns an error if the underlying edit fails.
    pub fn execute(&self, config: &EditorConfig) -> anyhow::Result<()> {
        match self {
            ClipCommands::List { file } => clips::list(file),
            ClipCommands::Extract { file, name, output } => {
                clips::extract(file, name, output.as_deref())
            }
            ClipCommands::Delete { file, name } => clips::delete(file, name, config),
            ClipCommands::Insert { file, clip } => clips::insert(file, clip, config),
            ClipCommands::Rename { file, old, new } => clips::rename(file, old, new, config),
            ClipCommands::Port { donor, target, name } => {
                clips::port(donor, target, name, config)
            }
        }
    }
}

impl EventCommands {
    /// Execute the selected event command.
    ///
    /// # Errors
    /// Returns an error if the underlying edit fails.
    pub fn execute(&self, config: &EditorConfig) -> anyhow::Result<()> {
        match self {
            EventCommands::List { file, clip } => events::list(file, clip),
            EventCommands::Remove {
                file,
                clip,
                event,
                event_type,
            } => events::remove(file, clip, event, event_type.as_deref(), config),
            EventCommands::Port {
                donor,
                target,
                event,
                from,
                to,
            } => events::port(donor, target, event, from, to.as_deref().unwrap_or(from), config),
        }
    }
}

impl FieldCommands {
    /// Execute the selected field command.
    ///
    /// # Errors
    /// Returns an error if the underlying edit fails.
    pub fn execute(&self, config: &EditorConfig) -> anyhow::Result<()> {
        match self {
            FieldCommands::Track { file, clip, value } => fields::track(file, clip, value, config),
            FieldCommands::Mask { file, clip, value } => fields::mask(file, clip, value, config),
            FieldCommands::AnimPath { file, clip, value } => {
                fields::anim_path(file, clip, value, config)
            }
        }
    }
}

impl ListCommands {
    /// Execute the selected list command.
    ///
    /// # Errors
    /// Returns an error if the underlying edit fails.
    pub fn execute(&self, config: &EditorConfig) -> anyhow::Result<()> {
        match self {
            ListCommands::AddClipName { file, clip, name } => {
                lists::add_clip_name(file, clip, name, config)
            }
            ListCommands::RemoveClipName { file, clip, name } => {
                lists::remove_clip_name(file, clip, name, config)
            }
            ListCommands::AddSelectorPair {
                file,
                clip,
                target,
                probability,
            } => lists::add_selector_pair(file, clip, target, *probability, config),
            ListCommands::AddConditionPair {
                file,
                clip,
                target,
                value,
            } => lists::add_condition_pair(file, clip, target, *value, config),
            ListCommands::RemovePair {
                file,
                clip,
                kind,
                index,
            } => lists::remove_pair(file, clip, kind.0, *index, config),
        }
    }
}

impl TrackCommands {
    /// Execute the selected track command.
    ///
    /// # Errors
    /// Returns an error if the underlying edit fails.
    pub fn execute(&self, config: &EditorConfig) -> anyhow::Result<()> {
        match self {
            TrackCommands::Set {
                file,
                track,
                priority,
                blend_mode,
                blend_weight,
            } => {
                let settings = TrackSettings {
                    priority: *priority,
                    blend_mode: *blend_mode,
                    blend_weight: *blend_weight,
                };
                tracks::set(file, track, &settings, config)
            }
            TrackCommands::Delete { file, track } => tracks::delete(file, track, config),
        }
    }
}

impl MaskCommands {
    /// Execute the selected mask command.
    ///
    /// # Errors
    /// Returns an error if the underlying edit fails.
    pub fn execute(&self, config: &EditorConfig) -> anyhow::Result<()> {
        match self {
            MaskCommands::Weights { file, mask, set } => {
                tracks::weights(file, mask, set.as_deref(), config)
            }
        }
    }
}

impl VfxCommands {
    /// Execute the selected VFX command.
    ///
    /// # Errors
    /// Returns an error if the underlying edit fails.
    pub fn execute(&self, config: &EditorConfig) -> anyhow::Result<()> {
        match self {
            VfxCommands::List { file } => vfx::list(file),
            VfxCommands::Extract { file, name, output } => {
                vfx::extract(file, name, output.as_deref())
            }
            VfxCommands::Port { donor, target, name } => vfx::port(donor, target, name, config),
        }
    }
}

impl ConfigCommands {
    /// Execute the selected config command.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read or written.
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<()> {
        match self {
            ConfigCommands::Show => config::show(config_path),
            ConfigCommands::Init { force } => config::init(config_path, *force),
        }
    }
}
