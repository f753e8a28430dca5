//! Text engine for the ritobin text format
//!
//! The format is handled as text with locatable block spans, never as a
//! tree: a block is found by its `<name> = <Type> {` anchor, its extent is
//! resolved by brace counting, and edits are ordered splices that leave
//! every byte outside the edited region untouched.
//!
//! - [`scan`] - brace matching and line helpers
//! - [`name`] - quoted vs hash names and value formatting
//! - [`locate`] - block and property lookup
//! - [`splice`] - insertion/removal primitives
//! - [`map_edit`] - map and list entry editing
//! - [`field`] - scalar field editing

pub mod field;
pub mod keywords;
pub mod locate;
pub mod map_edit;
pub mod name;
pub mod scan;
pub mod splice;

pub use field::{Field, animation_file_path, get_scalar_field, set_animation_file_path,
    set_name_field, set_scalar_field, set_scalar_field_after};
pub use locate::{BlockSpan, Braces, PropertySpan, list_blocks, locate, locate_all, locate_in,
    locate_property, locate_registry, require};
pub use map_edit::{MapProperty, Separator, add_entry, list_entries, remove_entry_at,
    remove_entry_named};
pub use name::{BlockName, format_name_value};
pub use scan::find_matching_close;
