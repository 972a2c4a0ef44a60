//! Parlance CLI entry point.
//!
//! Binary name: `parlance`
//!
//! Parses CLI arguments, initializes the database and configuration, then
//! dispatches to the appropriate command handler or starts the interactive
//! chat loop.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parlance_core=debug,parlance_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Initialize application state (DB, config)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat { id } => {
            cli::chat::run_chat_loop(&state, id).await?;
        }

        Commands::List => {
            cli::chats::list_chats(&state, cli.json).await?;
        }

        Commands::Delete { id } => {
            cli::chats::delete_chat(&state, id, cli.json).await?;
        }
    }

    Ok(())
}
