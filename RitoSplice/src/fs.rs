//! File read-modify-write
//!
//! The editors are pure text-to-text functions; this module wraps them in a
//! whole-file read, an in-memory edit and a single write. Nothing touches
//! the disk until the new text is complete, and a failed edit writes
//! nothing.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::error::Result;

/// Read a whole UTF-8 text file.
///
/// # Errors
/// Returns [`crate::Error::Io`] if the file cannot be read.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Write a whole UTF-8 text file.
///
/// # Errors
/// Returns [`crate::Error::Io`] if the file cannot be written.
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}

/// Where the backup copy of `path` goes (`<file>.<backup_extension>`).
pub fn backup_path(path: &Path, config: &EditorConfig) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(&config.files.backup_extension);
    PathBuf::from(name)
}

/// Apply `op` to the contents of `path` and write the result back.
///
/// The file is only written when the result differs from what was read.
/// With `[files] backup` enabled the original is copied aside first.
/// Returns whether the file was written.
///
/// # Errors
/// Returns the error from `op`, or [`crate::Error::Io`] for read/write
/// failures. On error the file is left untouched.
pub fn edit_file<P, F>(path: P, config: &EditorConfig, op: F) -> Result<bool>
where
    P: AsRef<Path>,
    F: FnOnce(&str) -> Result<String>,
{
    let path = path.as_ref();
    let original = read_text(path)?;
    let edited = op(&original)?;

    if edited == original {
        tracing::warn!("No changes to {}", path.display());
        return Ok(false);
    }

    if config.files.backup {
        let backup = backup_path(path, config);
        fs::copy(path, &backup)?;
        tracing::debug!("Backed up {} to {}", path.display(), backup.display());
    }

    write_text(path, &edited)?;
    tracing::info!("Wrote {}", path.display());
    Ok(true)
}
