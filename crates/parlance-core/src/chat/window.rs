//! Context window construction.
//!
//! Given a chat id, produce the exact ordered turn sequence submitted to
//! the completion backend: a fixed system turn, then either the full
//! persisted sequence or a summary of its head followed by the most recent
//! tail. Messages strictly between the summarized head and the replayed
//! tail are dropped; the constants driving this live in `ChatConfig`.

use parlance_types::chat::{ChatId, MessageRole, StoredMessage};
use parlance_types::config::ChatConfig;
use parlance_types::error::SessionError;
use parlance_types::llm::Turn;

use crate::chat::history::ChatHistory;
use crate::chat::repository::ChatRepository;
use crate::chat::summarizer::{ContextSummarizer, SUMMARY_FALLBACK};
use crate::llm::box_provider::BoxCompletionProvider;

/// Prefix of the synthetic assistant turn carrying the summary.
pub const SUMMARY_TURN_PREFIX: &str = "Previous conversation summary: ";

/// Windowing decision for a persisted message sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPlan {
    /// Replay every message verbatim.
    Full,
    /// Summarize the first `head` messages, then replay the last `tail`.
    Summarized { head: usize, tail: usize },
}

/// Decide how a persisted sequence of `len` messages is windowed.
pub fn plan_window(len: usize, max_before_summary: usize, recent_after_summary: usize) -> WindowPlan {
    if len > max_before_summary {
        WindowPlan::Summarized {
            head: max_before_summary,
            tail: recent_after_summary.min(len),
        }
    } else {
        WindowPlan::Full
    }
}

/// Rebuild a chat's in-memory history from persistence.
///
/// When the sequence is longer than the compaction threshold, the newest
/// persisted `Summary` row is reused if present; otherwise the head is
/// summarized now and the result persisted as a `Summary`-role message.
/// A failed summarization falls back to fixed text without persisting,
/// so a later rebuild can retry.
#[tracing::instrument(name = "build_history", skip(repo, provider, config))]
pub async fn build_history<C: ChatRepository>(
    repo: &C,
    provider: &BoxCompletionProvider,
    config: &ChatConfig,
    chat_id: ChatId,
) -> Result<ChatHistory, SessionError> {
    let messages = repo.get_messages(chat_id).await?;
    let mut history = ChatHistory::new(&config.system_message);

    match plan_window(
        messages.len(),
        config.max_messages_before_summary,
        config.recent_messages_after_summary,
    ) {
        WindowPlan::Full => {
            for message in &messages {
                push_replay_turn(&mut history, message);
            }
        }
        WindowPlan::Summarized { head, tail } => {
            let summary = obtain_summary(repo, provider, config, chat_id, &messages, head).await?;
            history.push(Turn::assistant(format!("{SUMMARY_TURN_PREFIX}{summary}")));
            for message in &messages[messages.len() - tail..] {
                push_replay_turn(&mut history, message);
            }
        }
    }

    Ok(history)
}

/// Replay one persisted message as a turn. `Summary` rows are compaction
/// records and are never replayed verbatim.
fn push_replay_turn(history: &mut ChatHistory, message: &StoredMessage) {
    match message.role {
        MessageRole::User => history.push_user(message.content.clone()),
        MessageRole::Assistant => history.push_assistant(message.content.clone()),
        MessageRole::Summary => {}
    }
}

async fn obtain_summary<C: ChatRepository>(
    repo: &C,
    provider: &BoxCompletionProvider,
    config: &ChatConfig,
    chat_id: ChatId,
    messages: &[StoredMessage],
    head: usize,
) -> Result<String, SessionError> {
    if let Some(existing) = messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Summary)
    {
        return Ok(existing.content.clone());
    }

    match ContextSummarizer::summarize(provider, &messages[..head], &config.model).await {
        Ok(summary) => {
            repo.append_message(chat_id, MessageRole::Summary, &summary, None)
                .await?;
            Ok(summary)
        }
        Err(err) => {
            tracing::warn!(error = %err, chat_id, "summarization failed, using fallback");
            Ok(SUMMARY_FALLBACK.to_string())
        }
    }
}
