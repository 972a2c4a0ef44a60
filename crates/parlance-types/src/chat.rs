//! Chat and message types for Parlance.
//!
//! A `Chat` is a persisted conversation thread; a `StoredMessage` is one
//! row of its append-only message sequence. Ordering within a chat is by
//! timestamp ascending and is the sole contract for context
//! reconstruction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::document::DocumentId;

/// Row id of a chat (SQLite AUTOINCREMENT).
pub type ChatId = i64;

/// Row id of a message (SQLite AUTOINCREMENT).
pub type MessageId = i64;

/// Role of a persisted message.
///
/// Maps to the `role` TEXT column. `Summary` rows are synthetic compaction
/// records written by the context window builder; they are never replayed
/// verbatim as conversation turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    Summary,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::Summary => write!(f, "summary"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "summary" => Ok(MessageRole::Summary),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A persisted conversation thread.
///
/// `last_updated` is bumped on every message write and drives both the
/// recent-chats ordering and capacity eviction (oldest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// A single message within a chat.
///
/// The persisted sequence is append-only: no edits, no deletes except
/// whole-chat deletion. `document_id` is a weak reference to a stored
/// document; the message never owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub document_id: Option<DocumentId>,
}
