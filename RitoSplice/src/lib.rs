//! # RitoSplice
//!
//! A structural text editor for the ritobin text form of League of Legends
//! bin files.
//!
//! Edits work on the text itself: named blocks are located by their
//! `<name> = <Type> {` anchor, resolved to a span by brace counting, and
//! changed with ordered splices. Formatting outside the edited region is
//! preserved byte for byte. Every operation takes the whole file text and
//! returns the whole new text, so an undo stack only has to keep snapshots.
//!
//! ## Supported Edits
//!
//! - **Clips** - Extract, delete (with transition cleanup), insert, rename, port
//! - **Events** - Add, list, extract, remove (scoped to one clip), port
//! - **Fields** - Track and mask names, animation file paths
//! - **Lists** - Clip name lists, selector pairs, condition-float pairs
//! - **Tracks/Masks** - Track priority and blending, mask weights
//! - **VFX systems** - List, extract, delete, insert, port
//!
//! ## Quick Start
//!
//! ```no_run
//! use ritosplice::clip::{delete_clip, extract_clip, insert_clip};
//! use ritosplice::config::EditorConfig;
//! use ritosplice::fs::edit_file;
//!
//! let config = EditorConfig::default();
//! let donor = std::fs::read_to_string("donor.py")?;
//! let clip = extract_clip(&donor, "Idle1")?.expect("clip exists");
//!
//! edit_file("target.py", &config, |text| {
//!     let text = delete_clip(text, "Idle1")?;
//!     insert_clip(&text, &clip, &config.layout)
//! })?;
//! # Ok::<(), ritosplice::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `ritosplice` command-line binary

pub mod clip;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod text;
pub mod track;
pub mod utils;
pub mod vfx;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{EditorConfig, Layout};
    pub use crate::error::{Error, Result};
    pub use crate::text::{BlockName, BlockSpan, format_name_value};

    // Clip operations
    pub use crate::clip::{
        ClipKind, ClipSummary, delete_clip, extract_clip, insert_clip, list_clips, port_clip,
        rename_clip,
    };
    pub use crate::clip::lists::{PairKind, add_clip_name, remove_clip_name};

    // Events
    pub use crate::event::{
        Event, EventData, EventSummary, add_event, list_events, port_event, remove_event,
    };

    pub use crate::track::{TrackSettings, set_clip_mask, set_clip_track, set_track};
    pub use crate::vfx::{extract_vfx_system, list_vfx_systems, port_vfx_system};
    pub use crate::fs::edit_file;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
