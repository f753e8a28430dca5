//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

use super::PairArg;

/// Animation clip commands
#[derive(Subcommand)]
pub enum ClipCommands {
    /// List clips in a file
    List {
        /// Animation graph text file
        file: PathBuf,
    },

    /// Print (or save) the full text of a clip
    Extract {
        /// Animation graph text file
        file: PathBuf,

        /// Clip name ("Name" or 0x hash)
        name: String,

        /// Write the clip to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a clip and the transitions that target it
    Delete {
        /// Animation graph text file
        file: PathBuf,

        /// Clip name
        name: String,
    },

    /// Insert a clip block from a file into mClipDataMap
    Insert {
        /// Animation graph text file
        file: PathBuf,

        /// File holding the clip block
        clip: PathBuf,
    },

    /// Rename a clip and every reference to it
    Rename {
        /// Animation graph text file
        file: PathBuf,

        /// Current clip name
        old: String,

        /// New clip name
        new: String,
    },

    /// Copy a clip from a donor file into a target file
    Port {
        /// Donor animation graph
        donor: PathBuf,

        /// Target animation graph (modified)
        target: PathBuf,

        /// Clip name
        name: String,
    },
}

/// Animation event commands
#[derive(Subcommand)]
pub enum EventCommands {
    /// List the events of a clip
    List {
        /// Animation graph text file
        file: PathBuf,

        /// Clip name
        clip: String,
    },

    /// Remove one event from one clip
    Remove {
        /// Animation graph text file
        file: PathBuf,

        /// Clip holding the event
        clip: String,

        /// Event name
        event: String,

        /// Event type (looked up in the clip if omitted)
        #[arg(short = 't', long = "type")]
        event_type: Option<String>,
    },

    /// Copy an event from a donor clip into a target clip
    Port {
        /// Donor animation graph
        donor: PathBuf,

        /// Target animation graph (modified)
        target: PathBuf,

        /// Event name
        event: String,

        /// Donor clip
        #[arg(long)]
        from: String,

        /// Target clip (defaults to the donor clip name)
        #[arg(long)]
        to: Option<String>,
    },
}

/// Clip field commands
#[derive(Subcommand)]
pub enum FieldCommands {
    /// Set mTrackDataName
    Track {
        /// Animation graph text file
        file: PathBuf,

        /// Clip name
        clip: String,

        /// Track name or 0x hash
        value: String,
    },

    /// Set mMaskDataName
    Mask {
        /// Animation graph text file
        file: PathBuf,

        /// Clip name
        clip: String,

        /// Mask name or 0x hash
        value: String,
    },

    /// Set mAnimationFilePath
    #[command(name = "anim-path")]
    AnimPath {
        /// Animation graph text file
        file: PathBuf,

        /// Clip name
        clip: String,

        /// Animation file path
        value: String,
    },
}

/// Clip list commands
#[derive(Subcommand)]
pub enum ListCommands {
    /// Append a name to mClipNameList
    #[command(name = "add-clip-name")]
    AddClipName {
        /// Animation graph text file
        file: PathBuf,

        /// Clip holding the list
        clip: String,

        /// Clip name to append
        name: String,
    },

    /// Remove a name from mClipNameList
    #[command(name = "remove-clip-name")]
    RemoveClipName {
        /// Animation graph text file
        file: PathBuf,

        /// Clip holding the list
        clip: String,

        /// Clip name to remove
        name: String,
    },

    /// Append a SelectorPairData
    #[command(name = "add-selector-pair")]
    AddSelectorPair {
        /// Animation graph text file
        file: PathBuf,

        /// Selector clip
        clip: String,

        /// Clip the pair selects
        target: String,

        /// Selection probability
        #[arg(short, long, default_value = "1")]
        probability: f32,
    },

    /// Append a ConditionFloatPairData
    #[command(name = "add-condition-pair")]
    AddConditionPair {
        /// Animation graph text file
        file: PathBuf,

        /// Condition-float clip
        clip: String,

        /// Clip the pair selects
        target: String,

        /// Condition value
        #[arg(short, long, default_value = "0")]
        value: f32,
    },

    /// Remove a pair by index
    #[command(name = "remove-pair")]
    RemovePair {
        /// Animation graph text file
        file: PathBuf,

        /// Clip holding the list
        clip: String,

        /// Pair list (selector, condition)
        kind: PairArg,

        /// Zero-based index of the pair
        index: usize,
    },
}

/// Track commands
#[derive(Subcommand)]
pub enum TrackCommands {
    /// Set track priority and blending, creating the track if needed
    Set {
        /// Animation graph text file
        file: PathBuf,

        /// Track name
        track: String,

        #[arg(long)]
        priority: Option<u8>,

        #[arg(long)]
        blend_mode: Option<u8>,

        #[arg(long)]
        blend_weight: Option<f32>,
    },

    /// Delete a track
    Delete {
        /// Animation graph text file
        file: PathBuf,

        /// Track name
        track: String,
    },
}

/// Mask commands
#[derive(Subcommand)]
pub enum MaskCommands {
    /// Print or replace the weights of a mask
    Weights {
        /// Animation graph text file
        file: PathBuf,

        /// Mask name
        mask: String,

        /// New weights (comma-separated); prints the current ones if omitted
        #[arg(long, value_delimiter = ',')]
        set: Option<Vec<f32>>,
    },
}

/// VFX system commands
#[derive(Subcommand)]
pub enum VfxCommands {
    /// List VFX systems in a file
    List {
        /// Skin or particle text file
        file: PathBuf,
    },

    /// Print (or save) the full text of a VFX system
    Extract {
        /// Skin or particle text file
        file: PathBuf,

        /// System name
        name: String,

        /// Write the system to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy a VFX system from a donor file into a target file
    Port {
        /// Donor file
        donor: PathBuf,

        /// Target file (modified)
        target: PathBuf,

        /// System name
        name: String,
    },
}

/// Config commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective config
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
