//! Ollama LLM provider implementation.
//!
//! This module provides the [`OllamaProvider`] which implements the
//! [`CompletionProvider`](parlance_core::llm::provider::CompletionProvider)
//! trait for a local Ollama server's chat API.

pub mod client;
pub mod types;

pub use client::OllamaProvider;
