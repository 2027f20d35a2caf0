//! CLI entry point for the camouflage generator

use camogen::io::cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> camogen::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    cli.run()?;
    Ok(())
}
