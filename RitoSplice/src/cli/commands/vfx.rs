//! CLI commands for VFX systems

use std::path::Path;

use crate::config::EditorConfig;
use crate::fs::{read_text, write_text};
use crate::vfx::{extract_vfx_system, list_vfx_systems, port_vfx_system};

use super::apply;

/// List VFX systems
pub fn list(file: &Path) -> anyhow::Result<()> {
    let text = read_text(file)?;
    let systems = list_vfx_systems(&text)?;
    for name in &systems {
        println!("{name}");
    }
    println!("{} system(s)", systems.len());
    Ok(())
}

/// Print a VFX system, or write it to `output`
pub fn extract(file: &Path, name: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let text = read_text(file)?;
    let Some(system) = extract_vfx_system(&text, name)? else {
        anyhow::bail!("VFX system {name} not found in {}", file.display());
    };
    match output {
        Some(path) => {
            write_text(path, &system)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{system}"),
    }
    Ok(())
}

/// Port a VFX system from `donor` into `target`
pub fn port(donor: &Path, target: &Path, name: &str, config: &EditorConfig) -> anyhow::Result<()> {
    let donor_text = read_text(donor)?;
    apply(target, config, |text| port_vfx_system(&donor_text, text, name, &config.layout))
}
