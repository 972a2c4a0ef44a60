//! CompletionProvider trait definition.
//!
//! This is the core abstraction that all completion backends implement.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use parlance_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion backends (Ollama, scripted stubs, etc.).
///
/// Implementations live in parlance-infra (e.g., `OllamaProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
