//! CLI commands for the config file

use std::path::{Path, PathBuf};

use crate::config::EditorConfig;

fn resolve(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => EditorConfig::default_path()
            .ok_or_else(|| anyhow::anyhow!("No config directory on this platform, pass --config")),
    }
}

/// Print the effective config
pub fn show(path: Option<&Path>) -> anyhow::Result<()> {
    let config = EditorConfig::load_or_default(path)?;
    match resolve(path) {
        Ok(p) if p.exists() => println!("# {}", p.display()),
        _ => println!("# defaults (no config file)"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default config
pub fn init(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = resolve(path)?;
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    EditorConfig::default().save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
