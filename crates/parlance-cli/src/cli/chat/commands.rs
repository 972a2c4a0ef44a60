//! Slash command parsing and execution for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for chat
//! management and help.

use console::style;

use parlance_types::chat::ChatId;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Start a new chat.
    New,
    /// List stored chats.
    Chats,
    /// Switch to another chat by id.
    Switch(ChatId),
    /// Show the current chat's context window.
    History,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/chats" | "/list" => Some(ChatCommand::Chats),
        "/history" => Some(ChatCommand::History),
        "/switch" => match arg.as_deref().map(str::parse::<ChatId>) {
            Some(Ok(id)) => Some(ChatCommand::Switch(id)),
            _ => Some(ChatCommand::Unknown(
                "/switch requires a chat id".to_string(),
            )),
        },
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}    {}", style("/help").cyan(), "Show this help message");
    println!("  {}   {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}    {}", style("/exit").cyan(), "End the chat session");
    println!("  {}     {}", style("/new").cyan(), "Start a new chat");
    println!("  {}   {}", style("/chats").cyan(), "List stored chats");
    println!("  {}  {}", style("/switch").cyan(), "Switch to a chat by id");
    println!("  {} {}", style("/history").cyan(), "Show the context window");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
