//! VFX system definitions
//!
//! `VfxSystemDefinitionData` blocks sit directly in the top-level `entries`
//! map of a skin or particle bin.

use crate::config::Layout;
use crate::error::{Error, Result};
use crate::text::keywords::{ENTRIES_MAP, VFX_SYSTEM};
use crate::text::splice::{insert_before_close, remove_span};
use crate::text::{BlockName, list_blocks, locate, locate_registry};

/// Names of every VFX system, in document order.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] for malformed text.
pub fn list_vfx_systems(text: &str) -> Result<Vec<BlockName>> {
    Ok(list_blocks(text, &[VFX_SYSTEM])?.into_iter().map(|span| span.name).collect())
}

/// The full text of VFX system `name`, or `None` when absent.
///
/// # Errors
/// Returns [`Error::InvalidName`] or [`Error::UnbalancedBraces`].
pub fn extract_vfx_system(text: &str, name: &str) -> Result<Option<String>> {
    let name = BlockName::parse(name)?;
    match locate(text, &name, &[VFX_SYSTEM])? {
        Some(span) => Ok(Some(span.slice(text).to_string())),
        None => {
            tracing::warn!("VFX system {} not found", name);
            Ok(None)
        }
    }
}

/// Delete VFX system `name`; a missing system leaves the text unchanged.
///
/// # Errors
/// Returns [`Error::InvalidName`] or [`Error::UnbalancedBraces`].
pub fn delete_vfx_system(text: &str, name: &str) -> Result<String> {
    let name = BlockName::parse(name)?;
    match locate(text, &name, &[VFX_SYSTEM])? {
        Some(span) => Ok(remove_span(text, span.start, span.close)),
        None => {
            tracing::warn!("VFX system {} not found, nothing deleted", name);
            Ok(text.to_string())
        }
    }
}

/// Insert a full VFX system block into the `entries` map.
///
/// # Errors
/// Returns [`Error::ParentMapNotFound`] when the text has no `entries` map.
pub fn insert_vfx_system(text: &str, system_text: &str, layout: &Layout) -> Result<String> {
    if system_text.trim().is_empty() {
        return Err(Error::InvalidValue { field: "system text".to_string(), value: String::new() });
    }
    let registry = locate_registry(text, ENTRIES_MAP)?;
    let indent = " ".repeat(layout.entries_indent);
    Ok(insert_before_close(
        text,
        registry.braces(),
        system_text,
        &indent,
        &registry.indent,
    ))
}

/// Copy VFX system `name` from `donor` into `target`, replacing any
/// same-named system there.
///
/// # Errors
/// Returns [`Error::BlockNotFound`] when the donor has no such system.
pub fn port_vfx_system(donor: &str, target: &str, name: &str, layout: &Layout) -> Result<String> {
    let parsed = BlockName::parse(name)?;
    let system = locate(donor, &parsed, &[VFX_SYSTEM])?
        .map(|span| span.slice(donor).to_string())
        .ok_or_else(|| Error::block_not_found(&parsed.literal(), &[VFX_SYSTEM]))?;
    let target = match locate(target, &parsed, &[VFX_SYSTEM])? {
        Some(span) => remove_span(target, span.start, span.close),
        None => target.to_string(),
    };
    insert_vfx_system(&target, &system, layout)
}
