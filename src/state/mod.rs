//! Conversation state
//!
//! The caller-owned state value threaded through the turn state machine.

mod conversation;

pub use conversation::{AssistantContent, Message, PlanState, ToolCall};
