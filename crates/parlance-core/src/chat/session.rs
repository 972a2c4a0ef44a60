//! Session orchestrator for the chat lifecycle.
//!
//! `SessionOrchestrator` owns the repository, the completion provider, the
//! configuration, and the per-chat in-memory history cache. Methods take
//! `&mut self`; per-chat write serialization is the caller's obligation in
//! multi-threaded hosts (wrap the orchestrator or shard by chat id).

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use parlance_types::chat::{Chat, ChatId, MessageRole};
use parlance_types::config::ChatConfig;
use parlance_types::error::{RepositoryError, SessionError};
use parlance_types::llm::CompletionRequest;

use crate::chat::history::ChatHistory;
use crate::chat::repository::ChatRepository;
use crate::chat::title;
use crate::chat::window;
use crate::llm::box_provider::BoxCompletionProvider;

/// Orchestrates chat lifecycle: creation with capacity eviction, history
/// caching, title generation, and the user-turn round trip.
pub struct SessionOrchestrator<C: ChatRepository> {
    repo: C,
    provider: BoxCompletionProvider,
    config: ChatConfig,
    /// Per-chat derived turn sequences, rebuilt on miss.
    histories: HashMap<ChatId, ChatHistory>,
    /// Chats whose title has been generated (or must not be), this process.
    title_generated: HashSet<ChatId>,
}

impl<C: ChatRepository> SessionOrchestrator<C> {
    pub fn new(repo: C, provider: BoxCompletionProvider, config: ChatConfig) -> Self {
        Self {
            repo,
            provider,
            config,
            histories: HashMap::new(),
            title_generated: HashSet::new(),
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// The cached history for a chat, if one has been built.
    pub fn history(&self, chat_id: ChatId) -> Option<&ChatHistory> {
        self.histories.get(&chat_id)
    }

    /// Create a new chat with the default title.
    ///
    /// When the store already holds `max_chats` chats, the single chat with
    /// the smallest `last_updated` is deleted first, along with its cache
    /// entry, so the bound `count <= max_chats` always holds.
    pub async fn create_new_chat(&mut self) -> Result<ChatId, SessionError> {
        let chats = self.repo.list_all_chats().await?;
        if chats.len() >= self.config.max_chats {
            if let Some(evicted) = self.repo.delete_oldest_chat().await? {
                self.histories.remove(&evicted);
                self.title_generated.remove(&evicted);
                info!(chat_id = evicted, "evicted oldest chat at capacity");
            }
        }

        let chat_id = self.repo.create_chat(&self.config.default_title).await?;
        self.histories
            .insert(chat_id, ChatHistory::new(&self.config.system_message));
        info!(chat_id, "created chat");
        Ok(chat_id)
    }

    /// Select an existing chat: build (or keep) its history and close the
    /// title gate so switching to an old chat never renames it.
    pub async fn select_chat(&mut self, chat_id: ChatId) -> Result<(), SessionError> {
        self.ensure_history(chat_id).await?;
        self.title_generated.insert(chat_id);
        Ok(())
    }

    /// Delete a chat and evict its derived state. Terminal: the id is
    /// `NotFound` afterwards.
    pub async fn delete_chat(&mut self, chat_id: ChatId) -> Result<(), SessionError> {
        self.repo.delete_chat(chat_id).await?;
        self.histories.remove(&chat_id);
        self.title_generated.remove(&chat_id);
        info!(chat_id, "deleted chat");
        Ok(())
    }

    pub async fn list_recent_chats(&self, limit: i64) -> Result<Vec<Chat>, SessionError> {
        Ok(self.repo.list_recent_chats(limit).await?)
    }

    pub async fn list_all_chats(&self) -> Result<Vec<Chat>, SessionError> {
        Ok(self.repo.list_all_chats().await?)
    }

    /// Run one user turn to completion and return the reply text.
    ///
    /// Appends the user turn to persistence and cache, generates the title
    /// on the first turn of a new chat, folds the optional document context
    /// into the request (never persisted), issues one completion call, and
    /// persists the assistant reply. This boundary never panics or
    /// propagates: every failure becomes an `"Error: ..."` string.
    #[tracing::instrument(name = "get_response", skip(self, input, document_context))]
    pub async fn get_response(
        &mut self,
        chat_id: ChatId,
        input: &str,
        document_context: Option<&str>,
    ) -> String {
        match self.try_get_response(chat_id, input, document_context).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, chat_id, "turn failed");
                format!("Error: {err}")
            }
        }
    }

    async fn try_get_response(
        &mut self,
        chat_id: ChatId,
        input: &str,
        document_context: Option<&str>,
    ) -> Result<String, SessionError> {
        // Build the cache from pre-append state, then append, so the entry
        // stays a consistent projection of persistence plus later pushes.
        self.ensure_history(chat_id).await?;
        self.repo
            .append_message(chat_id, MessageRole::User, input, None)
            .await?;

        if !self.title_generated.contains(&chat_id) {
            let new_title = title::title_or_fallback(&self.provider, input, &self.config).await;
            self.repo.update_chat_title(chat_id, &new_title).await?;
            self.title_generated.insert(chat_id);
            info!(chat_id, title = %new_title, "chat title set");
        }

        let mut turns = match self.histories.get_mut(&chat_id) {
            Some(history) => {
                history.push_user(input);
                history.turns().to_vec()
            }
            None => return Err(RepositoryError::NotFound.into()),
        };

        // Document context grounds this request only; persistence and the
        // cache keep the raw input.
        if let Some(context) = document_context {
            if let Some(last) = turns.last_mut() {
                last.content = format!(
                    "Use the following document context to answer the question.\n\n{context}\n\nQuestion: {input}"
                );
            }
        }

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: turns,
            temperature: None,
        };
        let response = self.provider.complete(&request).await?;
        let reply = response.content;

        self.repo
            .append_message(chat_id, MessageRole::Assistant, &reply, None)
            .await?;
        if let Some(history) = self.histories.get_mut(&chat_id) {
            history.push_assistant(reply.clone());
        }

        Ok(reply)
    }

    /// Return the cached history for a chat, building it on miss.
    async fn ensure_history(&mut self, chat_id: ChatId) -> Result<&mut ChatHistory, SessionError> {
        match self.histories.entry(chat_id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let history =
                    window::build_history(&self.repo, &self.provider, &self.config, chat_id)
                        .await?;
                Ok(entry.insert(history))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryChatRepository, StubProvider};
    use parlance_types::llm::TurnRole;

    fn orchestrator(stub: StubProvider) -> SessionOrchestrator<MemoryChatRepository> {
        SessionOrchestrator::new(
            MemoryChatRepository::new(),
            stub.boxed(),
            ChatConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_create_new_chat_starts_with_system_turn() {
        let mut orch = orchestrator(StubProvider::with_replies(vec![]));
        let chat_id = orch.create_new_chat().await.unwrap();

        let history = orch.history(chat_id).unwrap();
        assert_eq!(history.turns().len(), 1);
        assert_eq!(history.turns()[0].role, TurnRole::System);

        let chats = orch.list_all_chats().await.unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].title, "New Chat");
    }

    #[tokio::test]
    async fn test_capacity_evicts_single_oldest() {
        let mut orch = orchestrator(StubProvider::with_replies(vec![]));
        let first = orch.create_new_chat().await.unwrap();
        for _ in 0..4 {
            orch.create_new_chat().await.unwrap();
        }
        assert_eq!(orch.list_all_chats().await.unwrap().len(), 5);

        let sixth = orch.create_new_chat().await.unwrap();
        let chats = orch.list_all_chats().await.unwrap();
        assert_eq!(chats.len(), 5);
        assert!(chats.iter().all(|c| c.id != first));
        assert!(chats.iter().any(|c| c.id == sixth));
        assert!(orch.history(first).is_none());
    }

    #[tokio::test]
    async fn test_get_response_round_trip() {
        let stub = StubProvider::with_replies(vec![
            "Greeting The Assistant".to_string(),
            "Hello there!".to_string(),
        ]);
        let mut orch = orchestrator(stub);
        let chat_id = orch.create_new_chat().await.unwrap();

        let reply = orch.get_response(chat_id, "Hello", None).await;
        assert_eq!(reply, "Hello there!");

        let chats = orch.list_all_chats().await.unwrap();
        assert_eq!(chats[0].title, "Greeting The Assistant");

        let history = orch.history(chat_id).unwrap();
        let turns = history.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].role, TurnRole::User);
        assert_eq!(turns[1].content, "Hello");
        assert_eq!(turns[2].role, TurnRole::Assistant);
        assert_eq!(turns[2].content, "Hello there!");
    }

    #[tokio::test]
    async fn test_title_generated_at_most_once() {
        let stub = StubProvider::with_replies(vec![
            "Title".to_string(),
            "first reply".to_string(),
            "second reply".to_string(),
        ]);
        let requests = stub.requests();
        let mut orch = orchestrator(stub);
        let chat_id = orch.create_new_chat().await.unwrap();

        orch.get_response(chat_id, "one", None).await;
        orch.get_response(chat_id, "two", None).await;

        // Turn 1: title call + completion call. Turn 2: completion only.
        assert_eq!(requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_select_chat_closes_title_gate() {
        let stub = StubProvider::with_replies(vec!["reply".to_string()]);
        let requests = stub.requests();
        let mut orch = orchestrator(stub);
        let chat_id = orch.create_new_chat().await.unwrap();

        orch.select_chat(chat_id).await.unwrap();
        let reply = orch.get_response(chat_id, "hi", None).await;
        assert_eq!(reply, "reply");

        assert_eq!(requests.lock().unwrap().len(), 1);
        let chats = orch.list_all_chats().await.unwrap();
        assert_eq!(chats[0].title, "New Chat");
    }

    #[tokio::test]
    async fn test_get_response_error_is_string_boundary() {
        let mut orch = orchestrator(StubProvider::failing("connection refused"));
        let chat_id = orch.create_new_chat().await.unwrap();

        let reply = orch.get_response(chat_id, "hi", None).await;
        assert_eq!(reply, "Error: model unavailable: connection refused");
    }

    #[tokio::test]
    async fn test_get_response_unknown_chat() {
        let mut orch = orchestrator(StubProvider::with_replies(vec![]));
        let reply = orch.get_response(42, "hi", None).await;
        assert_eq!(reply, "Error: entity not found");
    }

    #[tokio::test]
    async fn test_document_context_not_persisted() {
        let stub = StubProvider::with_replies(vec![
            "Title".to_string(),
            "grounded reply".to_string(),
        ]);
        let requests = stub.requests();
        let mut orch = orchestrator(stub);
        let chat_id = orch.create_new_chat().await.unwrap();

        let reply = orch
            .get_response(chat_id, "what does section 3 say?", Some("Section 3: all systems nominal."))
            .await;
        assert_eq!(reply, "grounded reply");

        // The request carried the context...
        let seen = requests.lock().unwrap();
        let completion = &seen[1];
        let last = completion.messages.last().unwrap();
        assert!(last.content.contains("Section 3: all systems nominal."));
        assert!(last.content.contains("what does section 3 say?"));
        drop(seen);

        // ...but the cache kept the raw input.
        let history = orch.history(chat_id).unwrap();
        assert_eq!(history.turns()[1].content, "what does section 3 say?");
    }

    #[tokio::test]
    async fn test_delete_chat_is_terminal() {
        let mut orch = orchestrator(StubProvider::with_replies(vec![]));
        let chat_id = orch.create_new_chat().await.unwrap();

        orch.delete_chat(chat_id).await.unwrap();
        assert!(orch.history(chat_id).is_none());
        assert_eq!(orch.list_all_chats().await.unwrap().len(), 0);

        let reply = orch.get_response(chat_id, "hi", None).await;
        assert_eq!(reply, "Error: entity not found");
    }

    #[tokio::test]
    async fn test_long_chat_rebuild_has_summary_second() {
        let stub = StubProvider::with_replies(vec!["older context".to_string()]);
        let mut orch = orchestrator(stub);
        let chat_id = orch.repo.create_chat("Long Chat").await.unwrap();
        for i in 0..11 {
            let role = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            orch.repo
                .append_message(chat_id, role, &format!("m{i}"), None)
                .await
                .unwrap();
        }

        orch.select_chat(chat_id).await.unwrap();
        let history = orch.history(chat_id).unwrap();
        assert_eq!(
            history.turns()[1].content,
            "Previous conversation summary: older context"
        );
    }
}
