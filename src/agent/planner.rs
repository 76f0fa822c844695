//! Planner step
//!
//! Invokes the language model with the full conversation history plus the
//! tool catalog and appends exactly one assistant message. Model failures
//! never escape: they become an apology message and a turn diagnostic.

use crate::agent::prompt::SYSTEM_PROMPT;
use crate::error::LlmError;
use crate::llm::LanguageModel;
use crate::state::{AssistantContent, Message, PlanState};
use crate::tools::tool_catalog;

/// Run one planner step against the model
///
/// When no client is configured, no assistant message is appended and the
/// turn ends with an initialization error (terminal, non-retryable). Quota
/// failures and other invocation failures both append an apology assistant
/// message so the turn still completes.
pub(crate) async fn run_planner(llm: Option<&dyn LanguageModel>, state: &mut PlanState) {
    tracing::info!(history_len = state.messages.len(), "Running planner step");

    let Some(llm) = llm else {
        tracing::error!("Gemini API key is missing or invalid, cannot invoke LLM");
        state.error = Some("LLM client failed to initialize.".to_string());
        return;
    };

    // The system instruction is prepended per invocation, not persisted
    // into the caller-owned history.
    let mut invocation: Vec<Message> = Vec::with_capacity(state.messages.len() + 1);
    if !matches!(state.messages.first(), Some(Message::System { .. })) {
        invocation.push(Message::System {
            content: SYSTEM_PROMPT.to_string(),
        });
    }
    invocation.extend(state.messages.iter().cloned());

    match llm.invoke(&invocation, tool_catalog()).await {
        Ok(response) => {
            tracing::info!(
                content_len = response.content.len(),
                tool_calls = response.tool_calls.len(),
                "Planner received model response"
            );
            state.messages.push(Message::Assistant {
                content: AssistantContent::Text(response.content),
                tool_calls: response.tool_calls,
            });
            state.error = None;
        }
        Err(LlmError::Quota(details)) => {
            tracing::error!(details = %details, "LLM API quota exceeded");
            state.messages.push(Message::assistant_text(
                "Sorry, I encountered an API limit. Please try again later.",
            ));
            state.error = Some("Gemini API quota likely exceeded.".to_string());
        }
        Err(e) => {
            tracing::error!(error = %e, "LLM invocation failed");
            state.messages.push(Message::assistant_text(format!(
                "Sorry, an internal error occurred: {}",
                e
            )));
            state.error = Some(format!("LLM Error: {}", e));
        }
    }
}
