//! Conversation summarizer for context window compaction.
//!
//! `ContextSummarizer` condenses the head of a long conversation into a
//! short summary using a map/reduce pair of completion calls: rendered
//! message lines are partitioned into fixed-size chunks, each chunk is
//! summarized independently, and multiple partial summaries are combined
//! by one final call.

use parlance_types::chat::StoredMessage;
use parlance_types::llm::{CompletionRequest, LlmError, Turn};

use crate::llm::box_provider::BoxCompletionProvider;

/// System prompt for the per-chunk summarization call.
const SUMMARY_SYSTEM_PROMPT: &str = r#"Summarize the following conversation segment concisely. Preserve:
1. Key decisions and conclusions
2. Important facts mentioned
3. The user's current goals and context
4. Any unresolved questions

Keep the summary under 300 words. Write in third person (e.g., "The user asked about..." "The assistant recommended...")."#;

/// System prompt for the reduce call that merges partial summaries.
const COMBINE_SYSTEM_PROMPT: &str = "Combine the following partial conversation summaries into one concise summary. Keep it under 300 words and preserve all key facts, decisions, and open questions.";

/// Fixed text used when summarization fails for any reason.
pub const SUMMARY_FALLBACK: &str = "Previous conversation summary not available.";

/// Messages rendered per map-stage chunk.
const SUMMARY_CHUNK_SIZE: usize = 20;

/// Stateless utility for summarizing conversation history.
pub struct ContextSummarizer;

impl ContextSummarizer {
    /// Summarize a set of persisted messages into a concise text summary.
    ///
    /// Each message is rendered as a `"{role}: {content}"` line. Chunks of
    /// [`SUMMARY_CHUNK_SIZE`] lines are summarized independently; if more
    /// than one partial summary results, a final call combines them.
    #[tracing::instrument(
        name = "summarize_context",
        skip(provider, messages),
        fields(
            model = %model,
            message_count = messages.len(),
        )
    )]
    pub async fn summarize(
        provider: &BoxCompletionProvider,
        messages: &[StoredMessage],
        model: &str,
    ) -> Result<String, LlmError> {
        if messages.is_empty() {
            return Ok(String::new());
        }

        let lines: Vec<String> = messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect();

        let mut partials = Vec::new();
        for chunk in lines.chunks(SUMMARY_CHUNK_SIZE) {
            let partial =
                Self::summarize_chunk(provider, &chunk.join("\n\n"), model).await?;
            partials.push(partial);
        }

        if partials.len() == 1 {
            return Ok(partials.remove(0));
        }
        Self::combine_partials(provider, &partials, model).await
    }

    async fn summarize_chunk(
        provider: &BoxCompletionProvider,
        conversation_text: &str,
        model: &str,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: model.to_string(),
            messages: vec![
                Turn::system(SUMMARY_SYSTEM_PROMPT),
                Turn::user(format!(
                    "Please summarize this conversation:\n\n<conversation>\n{conversation_text}\n</conversation>"
                )),
            ],
            temperature: Some(0.0),
        };

        let response = provider.complete(&request).await?;
        Ok(response.content.trim().to_string())
    }

    async fn combine_partials(
        provider: &BoxCompletionProvider,
        partials: &[String],
        model: &str,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: model.to_string(),
            messages: vec![
                Turn::system(COMBINE_SYSTEM_PROMPT),
                Turn::user(partials.join("\n\n---\n\n")),
            ],
            temperature: Some(0.0),
        };

        let response = provider.complete(&request).await?;
        Ok(response.content.trim().to_string())
    }
}
