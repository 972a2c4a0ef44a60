//! Test doubles shared across the crate's unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use parlance_types::chat::{Chat, ChatId, MessageId, MessageRole, StoredMessage};
use parlance_types::document::DocumentId;
use parlance_types::error::RepositoryError;
use parlance_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use crate::chat::repository::ChatRepository;
use crate::llm::box_provider::BoxCompletionProvider;
use crate::llm::provider::CompletionProvider;

fn tick_timestamp(tick: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(tick, 0).unwrap()
}

/// Build a `StoredMessage` with a deterministic timestamp derived from `id`.
pub(crate) fn stored_message(
    id: MessageId,
    chat_id: ChatId,
    role: MessageRole,
    content: &str,
) -> StoredMessage {
    StoredMessage {
        id,
        chat_id,
        role,
        content: content.to_string(),
        timestamp: tick_timestamp(id),
        document_id: None,
    }
}

/// Scripted completion provider: pops one reply per `complete` call and
/// records every request it sees.
pub(crate) struct StubProvider {
    replies: Mutex<VecDeque<String>>,
    fail: Option<String>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl StubProvider {
    pub(crate) fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fail: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails with `LlmError::Unavailable`.
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fail: Some(message.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded requests, usable after `boxed()`.
    pub(crate) fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }

    pub(crate) fn boxed(self) -> BoxCompletionProvider {
        BoxCompletionProvider::new(self)
    }
}

impl CompletionProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = &self.fail {
            return Err(LlmError::Unavailable(message.clone()));
        }
        match self.replies.lock().unwrap().pop_front() {
            Some(content) => Ok(CompletionResponse {
                model: request.model.clone(),
                content,
            }),
            None => Err(LlmError::Provider {
                message: "no scripted reply left".to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct MemoryState {
    chats: Vec<Chat>,
    messages: Vec<StoredMessage>,
    next_chat_id: ChatId,
    next_message_id: MessageId,
    tick: i64,
}

/// In-memory `ChatRepository` honoring the persistence contract, with
/// deterministic monotonically increasing timestamps.
#[derive(Default)]
pub(crate) struct MemoryChatRepository {
    state: Mutex<MemoryState>,
}

impl MemoryChatRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl ChatRepository for MemoryChatRepository {
    async fn create_chat(&self, title: &str) -> Result<ChatId, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.tick += 1;
        state.next_chat_id += 1;
        let now = tick_timestamp(state.tick);
        let chat = Chat {
            id: state.next_chat_id,
            title: title.to_string(),
            created_at: now,
            last_updated: now,
        };
        let id = chat.id;
        state.chats.push(chat);
        Ok(id)
    }

    async fn update_chat_title(
        &self,
        chat_id: ChatId,
        title: &str,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        match state.chats.iter_mut().find(|c| c.id == chat_id) {
            Some(chat) => {
                chat.title = title.to_string();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete_chat(&self, chat_id: ChatId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.chats.len();
        state.chats.retain(|c| c.id != chat_id);
        if state.chats.len() == before {
            return Err(RepositoryError::NotFound);
        }
        state.messages.retain(|m| m.chat_id != chat_id);
        Ok(())
    }

    async fn delete_oldest_chat(&self) -> Result<Option<ChatId>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let oldest = state
            .chats
            .iter()
            .min_by_key(|c| c.last_updated)
            .map(|c| c.id);
        if let Some(id) = oldest {
            state.chats.retain(|c| c.id != id);
            state.messages.retain(|m| m.chat_id != id);
        }
        Ok(oldest)
    }

    async fn list_recent_chats(&self, limit: i64) -> Result<Vec<Chat>, RepositoryError> {
        let mut chats = self.list_all_chats().await?;
        chats.truncate(limit.max(0) as usize);
        Ok(chats)
    }

    async fn list_all_chats(&self) -> Result<Vec<Chat>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut chats = state.chats.clone();
        chats.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(chats)
    }

    async fn append_message(
        &self,
        chat_id: ChatId,
        role: MessageRole,
        content: &str,
        document_id: Option<DocumentId>,
    ) -> Result<StoredMessage, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if !state.chats.iter().any(|c| c.id == chat_id) {
            return Err(RepositoryError::NotFound);
        }
        state.tick += 1;
        state.next_message_id += 1;
        let now = tick_timestamp(state.tick);
        let message = StoredMessage {
            id: state.next_message_id,
            chat_id,
            role,
            content: content.to_string(),
            timestamp: now,
            document_id,
        };
        state.messages.push(message.clone());
        if let Some(chat) = state.chats.iter_mut().find(|c| c.id == chat_id) {
            chat.last_updated = now;
        }
        Ok(message)
    }

    async fn get_messages(&self, chat_id: ChatId) -> Result<Vec<StoredMessage>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut messages: Vec<StoredMessage> = state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    async fn count_chats(&self) -> Result<u64, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.chats.len() as u64)
    }
}
