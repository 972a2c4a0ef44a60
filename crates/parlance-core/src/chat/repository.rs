//! ChatRepository trait definition.
//!
//! Provides CRUD operations for chats and their append-only message
//! sequences. Uses native async fn in traits (RPITIT, Rust 2024 edition).

use parlance_types::chat::{Chat, ChatId, MessageRole, StoredMessage};
use parlance_types::document::DocumentId;
use parlance_types::error::RepositoryError;

/// Repository trait for chat and message persistence.
///
/// Implementations live in parlance-infra (e.g., `SqliteChatRepository`).
pub trait ChatRepository: Send + Sync {
    /// Create a new chat with the given title and current timestamps.
    fn create_chat(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<ChatId, RepositoryError>> + Send;

    /// Update a chat's title. `NotFound` if the chat does not exist.
    fn update_chat_title(
        &self,
        chat_id: ChatId,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a chat and all of its messages. `NotFound` if missing.
    fn delete_chat(
        &self,
        chat_id: ChatId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the chat with the smallest `last_updated`.
    ///
    /// Returns the deleted chat's id so callers can evict derived state,
    /// or `None` (no-op) when no chats exist.
    fn delete_oldest_chat(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<ChatId>, RepositoryError>> + Send;

    /// List the most recently updated chats, `last_updated` DESC.
    fn list_recent_chats(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// List every chat, `last_updated` DESC.
    fn list_all_chats(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Append one message and bump the chat's `last_updated`, atomically.
    ///
    /// Appending to a missing chat is `NotFound` and writes nothing.
    fn append_message(
        &self,
        chat_id: ChatId,
        role: MessageRole,
        content: &str,
        document_id: Option<DocumentId>,
    ) -> impl std::future::Future<Output = Result<StoredMessage, RepositoryError>> + Send;

    /// Get a chat's messages, timestamp ascending.
    ///
    /// Unknown chat ids yield an empty vec, not an error.
    fn get_messages(
        &self,
        chat_id: ChatId,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMessage>, RepositoryError>> + Send;

    /// Count all chats.
    fn count_chats(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
