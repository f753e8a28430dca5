//! CLI commands for clip operations

use std::path::Path;

use crate::clip::{delete_clip, extract_clip, insert_clip, list_clips, port_clip, rename_clip};
use crate::config::EditorConfig;
use crate::fs::{read_text, write_text};

use super::apply;

/// List the clips of a file
pub fn list(file: &Path) -> anyhow::Result<()> {
    let text = read_text(file)?;
    let clips = list_clips(&text)?;
    for clip in &clips {
        println!("{:<24} {}", clip.kind.keyword(), clip.name);
    }
    println!("{} clip(s)", clips.len());
    Ok(())
}

/// Print a clip, or write it to `output`
pub fn extract(file: &Path, name: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let text = read_text(file)?;
    let Some(clip) = extract_clip(&text, name)? else {
        anyhow::bail!("Clip {name} not found in {}", file.display());
    };
    match output {
        Some(path) => {
            write_text(path, &clip)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{clip}"),
    }
    Ok(())
}

/// Delete a clip and its transitions
pub fn delete(file: &Path, name: &str, config: &EditorConfig) -> anyhow::Result<()> {
    apply(file, config, |text| delete_clip(text, name))
}

/// Insert a clip block read from `clip`
pub fn insert(file: &Path, clip: &Path, config: &EditorConfig) -> anyhow::Result<()> {
    let clip_text = read_text(clip)?;
    apply(file, config, |text| insert_clip(text, &clip_text, &config.layout))
}

/// Rename a clip and its references
pub fn rename(file: &Path, old: &str, new: &str, config: &EditorConfig) -> anyhow::Result<()> {
    apply(file, config, |text| rename_clip(text, old, new))
}

/// Port a clip from `donor` into `target`
pub fn port(donor: &Path, target: &Path, name: &str, config: &EditorConfig) -> anyhow::Result<()> {
    let donor_text = read_text(donor)?;
    apply(target, config, |text| port_clip(&donor_text, text, name, &config.layout))
}
