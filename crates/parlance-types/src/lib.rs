//! Shared domain types for Parlance.
//!
//! This crate contains the core domain types used across the Parlance
//! workspace: chats, messages, documents, completion requests, errors,
//! and configuration.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod document;
pub mod error;
pub mod llm;
