//! `ritosplice` command-line entry point

fn main() -> anyhow::Result<()> {
    ritosplice::cli::run_cli()
}
