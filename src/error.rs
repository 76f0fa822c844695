//! Error types for the agent
//!
//! Failures are caught at the boundary of the component that detects them and
//! converted into either a structured tool-result payload or the turn state's
//! error string. These enums cover the two external client layers where typed
//! errors are still useful before that conversion happens.

use thiserror::Error;

/// Errors from the language model client
#[derive(Error, Debug)]
pub enum LlmError {
    /// The provider rejected the call for rate/quota reasons (HTTP 429)
    #[error("API quota exceeded: {0}")]
    Quota(String),

    /// The provider refused to answer the prompt (safety block)
    #[error("Prompt was blocked: {0}")]
    Blocked(String),

    /// HTTP transport failed or timed out
    #[error("LLM request failed: {0}")]
    Request(String),

    /// The response body could not be interpreted
    #[error("Failed to parse LLM response: {0}")]
    Parse(String),
}

/// Errors from the maps/weather provider clients
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP transport failed or timed out
    #[error("Provider request failed: {0}")]
    Request(String),

    /// The provider answered with a non-OK application status
    #[error("Provider returned status {0}")]
    Status(String),

    /// The response body could not be interpreted
    #[error("Failed to parse provider response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Request(e.to_string())
    }
}
