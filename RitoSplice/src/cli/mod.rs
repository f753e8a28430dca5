//! RitoSplice CLI - Command-line interface for ritobin text editing

pub mod commands;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "ritosplice")]
#[command(about = "RitoSplice: structural editing of ritobin text files", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to the per-user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Run the RitoSplice CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute(cli.config.as_deref())?;

    Ok(())
}
