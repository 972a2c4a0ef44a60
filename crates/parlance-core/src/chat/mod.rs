//! Chat-history lifecycle for Parlance.
//!
//! This module defines the `ChatRepository` trait the infrastructure layer
//! implements, the in-memory `ChatHistory` cache entry, the context window
//! builder, the summarization service, title generation, and the session
//! orchestrator that ties them together.

pub mod history;
pub mod repository;
pub mod session;
pub mod summarizer;
pub mod title;
pub mod window;
