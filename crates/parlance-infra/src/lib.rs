//! Infrastructure layer for Parlance.
//!
//! Contains implementations of the repository and provider traits defined in
//! `parlance-core`: SQLite storage, the Ollama HTTP completion client, and
//! configuration file loading.

pub mod config;
pub mod llm;
pub mod sqlite;
