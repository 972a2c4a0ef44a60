//! CLI command definitions and dispatch for the `parlance` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod chats;

use clap::{Parser, Subcommand};

use parlance_types::chat::ChatId;

/// Chat with a locally-hosted model, with persistent history.
#[derive(Parser)]
#[command(name = "parlance", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (a new chat unless --id is given).
    Chat {
        /// Existing chat id to resume.
        #[arg(long)]
        id: Option<ChatId>,
    },

    /// List stored chats, most recently updated first.
    #[command(alias = "ls")]
    List,

    /// Delete a chat and its messages.
    #[command(alias = "rm")]
    Delete {
        /// Chat id to delete.
        id: ChatId,
    },
}
