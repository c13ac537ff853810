//! Main entry point for the `research` binary.

mod cli;
mod commands;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use color_eyre::eyre::eyre;
use commands::GlobalFlags;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let cli = Cli::parse();
    let flags = GlobalFlags {
        root: cli.root,
        json: cli.json,
        offline: cli.offline,
    };

    match cli.command {
        Command::Run { topic, bookmark } => commands::run(&flags, &topic, bookmark).await,
        Command::Bookmarks { action } => commands::bookmarks(&flags, action).await,
        Command::Ideas { topic } => commands::ideas(&flags, &topic).await,
        Command::Init { force } => commands::init(&flags.root, force).await,
    }
}

/// Log to stderr so stdout stays clean for `--json`.
fn init_tracing() -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize tracing: {e}"))
}
