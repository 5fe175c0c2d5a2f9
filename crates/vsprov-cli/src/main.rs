//! vsprov - Visual Studio Build Tools provisioner CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vsprov_cli::{Cli, Commands, cmd, config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --quiet
    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Install { packages, dry_run } => {
            let settings = config::resolve(cli.config.as_deref(), cli.overrides, packages)?;
            cmd::install::install(&settings, dry_run).await
        }
        Commands::Plan { packages } => {
            let settings = config::resolve(cli.config.as_deref(), cli.overrides, packages)?;
            cmd::plan::plan(&settings).await
        }
        Commands::Hash { files } => cmd::hash::hash(&files).await,
    }
}
