//! Gemini API wire types
//!
//! Structs that mirror the Gemini `generateContent` JSON format, including
//! the function-calling parts used for tool requests and results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `generateContent`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Ordered conversation contents
    pub contents: Vec<RequestContent>,
    /// System instruction, kept out of `contents`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    /// Declared tool catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDeclarations>>,
}

/// System instruction wrapper
#[derive(Serialize, Debug)]
pub struct SystemInstruction {
    /// Instruction parts (a single text part)
    pub parts: Vec<RequestPart>,
}

/// A single conversation content entry
#[derive(Serialize, Debug)]
pub struct RequestContent {
    /// `"user"` or `"model"`
    pub role: String,
    /// Ordered parts of this entry
    pub parts: Vec<RequestPart>,
}

/// One part of a request content entry
#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestPart {
    /// Plain text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// A tool call previously issued by the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    /// The answer to a tool call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl RequestPart {
    /// Build a plain text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Function-declaration set attached to a request
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ToolDeclarations {
    /// Declared functions the model may call
    pub function_declarations: Vec<FunctionDeclaration>,
}

/// A single declared function
#[derive(Serialize, Debug)]
pub struct FunctionDeclaration {
    /// Function name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON schema for the argument object
    pub parameters: Value,
}

/// A model-issued function call
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FunctionCall {
    /// Function name
    pub name: String,
    /// Argument object
    #[serde(default)]
    pub args: Value,
}

/// The answer to a function call
#[derive(Serialize, Debug)]
pub struct FunctionResponse {
    /// Name of the function this answers
    pub name: String,
    /// Response object
    pub response: Value,
}

/// Top-level `generateContent` response
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate responses from the model
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback about the prompt (e.g., if it was blocked)
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// A single candidate response
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of this candidate
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

/// Content of a candidate
#[derive(Deserialize, Debug)]
pub struct ResponseContent {
    /// Ordered response parts (text and/or function calls)
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// One part of a candidate's content
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    /// Text content, if this is a text part
    #[serde(default)]
    pub text: Option<String>,
    /// Function call, if this is a tool-request part
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
}

/// Feedback about the prompt
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason the prompt was blocked, if applicable
    #[serde(default)]
    pub block_reason: Option<String>,
}
