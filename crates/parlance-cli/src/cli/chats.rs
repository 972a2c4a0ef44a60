//! Chat listing and deletion commands.

use console::style;

use parlance_core::chat::repository::ChatRepository;
use parlance_infra::sqlite::chat::SqliteChatRepository;
use parlance_types::chat::ChatId;

use crate::state::AppState;

/// List all stored chats, most recently updated first.
pub async fn list_chats(state: &AppState, json: bool) -> anyhow::Result<()> {
    let repo = SqliteChatRepository::new(state.db_pool.clone());
    let chats = repo.list_all_chats().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chats)?);
        return Ok(());
    }

    if chats.is_empty() {
        println!();
        println!(
            "  {}",
            style("No chats yet. Start one with: parlance chat").dim()
        );
        println!();
        return Ok(());
    }

    println!();
    for chat in &chats {
        println!(
            "  {}  {}  {}",
            style(format!("#{}", chat.id)).cyan().bold(),
            chat.title,
            style(chat.last_updated.format("%Y-%m-%d %H:%M").to_string()).dim()
        );
    }
    println!();

    Ok(())
}

/// Delete a chat by id.
pub async fn delete_chat(state: &AppState, id: ChatId, json: bool) -> anyhow::Result<()> {
    let repo = SqliteChatRepository::new(state.db_pool.clone());
    repo.delete_chat(id).await?;

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!();
        println!("  {} Deleted chat #{id}", style("✓").green());
        println!();
    }

    Ok(())
}
