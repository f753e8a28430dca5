//! Editor configuration (`ritosplice/config.toml`)
//!
//! Controls the indentation used when the editors generate new lines and
//! the backup policy for file writes. Every section is optional; a missing
//! file yields the defaults, which match the layout ritobin writes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

fn default_indent_unit() -> usize {
    4
}

fn default_clip_indent() -> usize {
    12
}

fn default_entries_indent() -> usize {
    4
}

fn default_backup_extension() -> String {
    "bak".to_string()
}

/// The full editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub files: FileSettings,
}

/// Indentation used for generated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Spaces per nesting level.
    #[serde(default = "default_indent_unit")]
    pub indent_unit: usize,
    /// Indentation of clips inside `mClipDataMap`.
    #[serde(default = "default_clip_indent")]
    pub clip_indent: usize,
    /// Indentation of top-level objects inside `entries`.
    #[serde(default = "default_entries_indent")]
    pub entries_indent: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            indent_unit: default_indent_unit(),
            clip_indent: default_clip_indent(),
            entries_indent: default_entries_indent(),
        }
    }
}

impl Layout {
    /// One nesting level as a string.
    pub fn unit(&self) -> String {
        " ".repeat(self.indent_unit)
    }

    /// `indent` plus one nesting level.
    pub fn deeper(&self, indent: &str) -> String {
        format!("{indent}{}", self.unit())
    }
}

/// File write policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Copy the original file aside before writing the edited text.
    #[serde(default)]
    pub backup: bool,
    /// Extension appended to the backup copy.
    #[serde(default = "default_backup_extension")]
    pub backup_extension: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            backup: false,
            backup_extension: default_backup_extension(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    /// Returns [`crate::Error::ConfigParse`] for invalid TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render the config as TOML text.
    ///
    /// # Errors
    /// Returns [`crate::Error::ConfigSerialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Write the config to a file, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// The per-user config location (`<config dir>/ritosplice/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ritosplice").join("config.toml"))
    }

    /// Load `path`, or the per-user config, falling back to defaults when
    /// no file exists.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };
        match path {
            Some(p) if p.exists() => {
                tracing::debug!("Loading config from {}", p.display());
                Self::load(p)
            }
            _ => Ok(Self::default()),
        }
    }
}
