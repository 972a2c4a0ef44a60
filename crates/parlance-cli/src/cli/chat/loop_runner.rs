//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: chat selection or creation,
//! welcome banner, input loop with slash commands, and turn processing
//! through the session orchestrator.

use std::io::Write;

use console::style;
use tokio::io::AsyncBufReadExt;

use parlance_types::chat::ChatId;
use parlance_types::llm::TurnRole;

use crate::state::AppState;

use super::commands::{self, ChatCommand};

/// Run the interactive chat loop.
///
/// Resumes `resume_id` when given, otherwise creates a new chat (evicting
/// the oldest one at capacity).
pub async fn run_chat_loop(state: &AppState, resume_id: Option<ChatId>) -> anyhow::Result<()> {
    let mut orchestrator = state.orchestrator();

    let mut current = match resume_id {
        Some(id) => {
            orchestrator.select_chat(id).await?;
            id
        }
        None => orchestrator.create_new_chat().await?,
    };

    print_welcome_banner(state, current);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  {} ", style("You >").green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            println!("  {}", style("Session ended.").dim());
            break;
        };
        let text = line.trim().to_string();
        if text.is_empty() {
            continue;
        }

        // Slash commands
        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => {
                    commands::print_help();
                    continue;
                }
                ChatCommand::Clear => {
                    let _ = console::Term::stdout().clear_screen();
                    continue;
                }
                ChatCommand::Exit => {
                    println!();
                    println!("  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::New => {
                    current = orchestrator.create_new_chat().await?;
                    println!();
                    println!("  {} Started chat #{current}", style("*").cyan().bold());
                    println!();
                    continue;
                }
                ChatCommand::Chats => {
                    let chats = orchestrator.list_all_chats().await?;
                    println!();
                    for chat in &chats {
                        let marker = if chat.id == current { ">" } else { " " };
                        println!(
                            "  {} {}  {}",
                            marker,
                            style(format!("#{}", chat.id)).cyan(),
                            chat.title
                        );
                    }
                    println!();
                    continue;
                }
                ChatCommand::Switch(id) => {
                    match orchestrator.select_chat(id).await {
                        Ok(()) => {
                            current = id;
                            println!();
                            println!("  {} Switched to chat #{id}", style("*").cyan().bold());
                            println!();
                        }
                        Err(e) => {
                            println!();
                            println!("  {} Could not switch: {e}", style("!").red().bold());
                            println!();
                        }
                    }
                    continue;
                }
                ChatCommand::History => {
                    print_history(&orchestrator, current);
                    continue;
                }
                ChatCommand::Unknown(name) => {
                    println!();
                    println!(
                        "  {} Unknown command: {}. Type /help for available commands.",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                    println!();
                    continue;
                }
            }
        }

        // Turn processing; failures come back as a displayable string.
        let reply = orchestrator.get_response(current, &text, None).await;
        println!();
        println!("  {} {}", style("Model >").cyan().bold(), reply.trim());
        println!();
    }

    Ok(())
}

fn print_welcome_banner(state: &AppState, chat_id: ChatId) {
    println!();
    println!(
        "  {} {}",
        style("Parlance").cyan().bold(),
        style(format!("(chat #{chat_id})")).dim()
    );
    println!(
        "  {}",
        style(format!(
            "model: {}  server: {}",
            state.config.model, state.config.ollama_base_url
        ))
        .dim()
    );
    println!("  {}", style("Type /help for commands, Ctrl+D to exit.").dim());
    println!();
}

fn print_history(
    orchestrator: &parlance_core::chat::session::SessionOrchestrator<
        parlance_infra::sqlite::chat::SqliteChatRepository,
    >,
    chat_id: ChatId,
) {
    let Some(history) = orchestrator.history(chat_id) else {
        println!();
        println!("  {}", style("No cached history for this chat yet.").dim());
        println!();
        return;
    };

    println!();
    for turn in history.turns() {
        let role_label = match turn.role {
            TurnRole::System => style("System").dim(),
            TurnRole::User => style("You").green(),
            TurnRole::Assistant => style("Model").cyan(),
        };
        let preview: String = if turn.content.chars().count() > 100 {
            let head: String = turn.content.chars().take(97).collect();
            format!("{head}...")
        } else {
            turn.content.clone()
        };
        println!("  {} {}", role_label.bold(), preview);
    }
    println!();
}
