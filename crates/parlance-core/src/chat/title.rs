//! Chat title generation.
//!
//! `generate_title` asks the model for a short title based on the first
//! user message; `title_or_fallback` applies the sanitization and fallback
//! policy so the caller always gets a displayable title.

use parlance_types::config::ChatConfig;
use parlance_types::llm::{CompletionRequest, LlmError, Turn};

use crate::llm::box_provider::BoxCompletionProvider;

/// System prompt for the title generation call.
const TITLE_SYSTEM_PROMPT: &str = r#"Generate a short, descriptive title (3-7 words) for a conversation that starts with the user message below. The title should capture the main topic or intent. Return ONLY the title text, nothing else.

Examples:
- "Debugging Rust lifetime errors"
- "Planning a weekend trip to Tokyo"
- "Understanding quantum computing basics""#;

/// Generate a chat title from the first user message.
///
/// One completion call at low temperature. The result is trimmed of
/// whitespace and surrounding quotes but not otherwise validated; length
/// and emptiness policy live in [`title_or_fallback`].
#[tracing::instrument(name = "generate_title", skip(provider, first_user_message), fields(model = %model))]
pub async fn generate_title(
    provider: &BoxCompletionProvider,
    first_user_message: &str,
    model: &str,
) -> Result<String, LlmError> {
    let request = CompletionRequest {
        model: model.to_string(),
        messages: vec![
            Turn::system(TITLE_SYSTEM_PROMPT),
            Turn::user(first_user_message),
        ],
        temperature: Some(0.3),
    };

    let response = provider.complete(&request).await?;
    Ok(sanitize(&response.content))
}

/// Generate a title, applying the fallback policy.
///
/// An empty or over-long model result falls back to a truncation of the
/// first user message; a failed completion falls back to the default
/// title.
pub async fn title_or_fallback(
    provider: &BoxCompletionProvider,
    first_user_message: &str,
    config: &ChatConfig,
) -> String {
    match generate_title(provider, first_user_message, &config.model).await {
        Ok(title) if !title.is_empty() && title.chars().count() <= config.max_title_length => {
            title
        }
        Ok(_) => truncate_title(first_user_message, config.max_title_length),
        Err(err) => {
            tracing::warn!(error = %err, "title generation failed, using default");
            config.default_title.clone()
        }
    }
}

fn sanitize(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .to_string()
}

/// First `max_len - 3` characters of the message plus `"..."`.
/// Operates on chars, so multibyte input never splits a boundary.
fn truncate_title(message: &str, max_len: usize) -> String {
    let keep = max_len.saturating_sub(3);
    let truncated: String = message.chars().take(keep).collect();
    format!("{truncated}...")
}
