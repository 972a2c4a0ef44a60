//! OllamaProvider -- concrete [`CompletionProvider`] implementation for Ollama.
//!
//! Sends non-streaming requests to a local Ollama server's chat API
//! (`/api/chat`). Transport failures (connection refused, DNS, timeout)
//! map to [`LlmError::Unavailable`] so callers can distinguish a down
//! backend from a rejected request.

use std::time::Duration;

use parlance_core::llm::provider::CompletionProvider;
use parlance_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::types::{
    OllamaChatRequest, OllamaChatResponse, OllamaErrorResponse, OllamaMessage, OllamaOptions,
};

/// Ollama LLM provider.
///
/// Implements [`CompletionProvider`] against an Ollama server, local by
/// default. No authentication; the server is addressed by base URL only.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server address (e.g., "http://localhost:11434")
    /// * `model` - Model identifier (e.g., "deepseek-coder-v2:16b")
    pub fn new(base_url: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min timeout for long generations
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// The default model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into an [`OllamaChatRequest`].
    fn to_ollama_request(&self, request: &CompletionRequest) -> OllamaChatRequest {
        let messages = request
            .messages
            .iter()
            .map(|t| OllamaMessage {
                role: t.role.to_string(),
                content: t.content.clone(),
            })
            .collect();

        OllamaChatRequest {
            model: request.model.clone(),
            messages,
            stream: false,
            options: request
                .temperature
                .map(|temperature| OllamaOptions {
                    temperature: Some(temperature),
                }),
        }
    }
}

impl CompletionProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_ollama_request(request);
        let url = self.url("/api/chat");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    LlmError::Unavailable(e.to_string())
                } else {
                    LlmError::Provider {
                        message: format!("HTTP request failed: {e}"),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<OllamaErrorResponse>(&error_body)
                .map(|e| e.error)
                .unwrap_or(error_body);
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest(detail),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {detail}"),
                },
            });
        }

        let ollama_resp: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(CompletionResponse {
            model: ollama_resp.model,
            content: ollama_resp.message.content,
        })
    }
}
