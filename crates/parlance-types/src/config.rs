//! Configuration types for Parlance.
//!
//! `ChatConfig` represents the `config.toml` that controls history
//! limits, the compaction policy, and the completion backend.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Parlance chat engine.
///
/// Loaded from `~/.parlance/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of chats retained; creating one past this limit
    /// evicts the least recently updated chat.
    #[serde(default = "default_max_chats")]
    pub max_chats: usize,

    /// History length at which the head of a chat is compacted into a
    /// summary turn.
    #[serde(default = "default_max_messages_before_summary")]
    pub max_messages_before_summary: usize,

    /// Number of most recent messages replayed verbatim after a summary.
    #[serde(default = "default_recent_messages_after_summary")]
    pub recent_messages_after_summary: usize,

    /// Maximum length of a generated chat title, in characters.
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,

    /// Title assigned to a chat at creation and on title-generation failure.
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Model identifier sent to the completion backend.
    #[serde(default = "default_model")]
    pub model: String,

    /// System turn prepended to every context window.
    #[serde(default = "default_system_message")]
    pub system_message: String,

    /// Base URL of the Ollama HTTP API.
    #[serde(default = "default_ollama_base_url")]
    pub ollama_base_url: String,
}

fn default_max_chats() -> usize {
    5
}

fn default_max_messages_before_summary() -> usize {
    10
}

fn default_recent_messages_after_summary() -> usize {
    5
}

fn default_max_title_length() -> usize {
    40
}

fn default_title() -> String {
    "New Chat".to_string()
}

fn default_model() -> String {
    "deepseek-coder-v2:16b".to_string()
}

fn default_system_message() -> String {
    "You are a helpful AI assistant specialized in coding and software development.".to_string()
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_chats: default_max_chats(),
            max_messages_before_summary: default_max_messages_before_summary(),
            recent_messages_after_summary: default_recent_messages_after_summary(),
            max_title_length: default_max_title_length(),
            default_title: default_title(),
            model: default_model(),
            system_message: default_system_message(),
            ollama_base_url: default_ollama_base_url(),
        }
    }
}
