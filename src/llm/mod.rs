//! Language model abstraction
//!
//! The planner talks to the model through the [`LanguageModel`] trait so the
//! state machine can be tested with scripted fakes. The production
//! implementation is [`GeminiClient`].

mod gemini;
mod types;

pub use gemini::GeminiClient;

use crate::error::LlmError;
use crate::state::{Message, ToolCall};
use crate::tools::ToolDefinition;
use async_trait::async_trait;

/// One model response: free-form text and/or requested tool calls
#[derive(Debug, Clone, Default)]
pub struct ModelResponse {
    /// Text content (may be empty when only tools were requested)
    pub content: String,
    /// Requested tool invocations, in request order
    pub tool_calls: Vec<ToolCall>,
}

/// A chat model that accepts an ordered history plus a tool catalog
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Invoke the model with the full message history and available tools
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelResponse, LlmError>;
}
