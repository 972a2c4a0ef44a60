//! Business logic and repository trait definitions for Parlance.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the chat-history lifecycle logic:
//! context window construction, summarization, title generation, and the
//! session orchestrator. It depends only on `parlance-types` -- never on
//! `parlance-infra` or any database/IO crate.

pub mod chat;
pub mod document;
pub mod llm;

#[cfg(test)]
pub(crate) mod testing;
