//! Conversation data models
//!
//! Defines the message history, tool-call records, and the per-turn plan
//! state. The state is owned by the caller across turns; the orchestrator
//! receives it by value for one turn and returns an updated value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A model-requested call to an external capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call identifier; empty when the model omitted one
    pub id: String,
    /// Name of the requested tool
    pub name: String,
    /// Argument mapping as raw JSON
    pub args: Value,
}

/// Assistant message content: a single string or an ordered list of fragments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssistantContent {
    /// Free-form text
    Text(String),
    /// Ordered content fragments
    Parts(Vec<String>),
}

impl AssistantContent {
    /// Iterate over the content as string fragments
    pub fn fragments(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            AssistantContent::Text(s) => Box::new(std::iter::once(s.as_str())),
            AssistantContent::Parts(parts) => Box::new(parts.iter().map(String::as_str)),
        }
    }

    /// Concatenated text of all fragments
    pub fn joined(&self) -> String {
        match self {
            AssistantContent::Text(s) => s.clone(),
            AssistantContent::Parts(parts) => parts.join(""),
        }
    }
}

/// A single message in the conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    /// System instruction prepended to the history
    System {
        /// Instruction text
        content: String,
    },
    /// Message from the end user
    User {
        /// User text
        content: String,
    },
    /// Message from the model, optionally requesting tool calls
    Assistant {
        /// Text content and/or fragments
        content: AssistantContent,
        /// Pending tool invocations, in request order
        #[serde(default)]
        tool_calls: Vec<ToolCall>,
    },
    /// Answer to a single tool invocation
    ToolResult {
        /// Call identifier this result answers
        call_id: String,
        /// Success value or `{"error": …}` payload
        payload: Value,
    },
}

impl Message {
    /// Build an assistant message carrying plain text and no tool calls
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Message::Assistant {
            content: AssistantContent::Text(text.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Tool calls of an assistant message, empty for all other variants
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

/// Per-turn conversation state
///
/// Messages are append-only within a turn; insertion order is the only
/// order. `current_plan` holds the latest validated itinerary document and
/// is replaced wholesale, never merged. `error` is a free-text diagnostic
/// for the current turn, cleared whenever a turn completes without error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanState {
    /// Ordered conversation history
    pub messages: Vec<Message>,
    /// Latest validated itinerary document
    pub current_plan: Option<Value>,
    /// Diagnostic for the current turn
    pub error: Option<String>,
}

impl PlanState {
    /// Create an empty conversation state
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent message, if any
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
