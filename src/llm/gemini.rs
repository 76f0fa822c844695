//! Gemini API client
//!
//! Direct HTTP client for the Gemini `generateContent` endpoint with
//! function calling. Maps the conversation history onto the Gemini content
//! format and classifies provider failures (quota, blocked prompt, parse)
//! so the planner can react without inspecting raw HTTP errors.

use crate::config::GeminiConfig;
use crate::error::LlmError;
use crate::llm::types::{
    FunctionCall, FunctionDeclaration, FunctionResponse, GenerateContentRequest,
    GenerateContentResponse, RequestContent, RequestPart, SystemInstruction, ToolDeclarations,
};
use crate::llm::{LanguageModel, ModelResponse};
use crate::state::{Message, ToolCall};
use crate::tools::ToolDefinition;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

/// Gemini HTTP client
pub struct GeminiClient {
    api_key: String,
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Create a client from configuration
    ///
    /// Returns `None` when no API key is configured; the planner then runs
    /// in degraded mode and every turn ends with an initialization error.
    pub fn new(config: GeminiConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        tracing::info!(model = %config.model, "Gemini client initialized");
        Some(Self {
            api_key,
            config,
            http,
        })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.api_key
        )
    }

    /// Build the request body from the history and tool catalog
    ///
    /// The first system message becomes `systemInstruction`. Tool results
    /// are answered as `functionResponse` parts; the Gemini wire format
    /// addresses them by function name, so call ids are resolved against the
    /// tool calls seen earlier in the history.
    fn build_request(&self, messages: &[Message], tools: &[ToolDefinition]) -> GenerateContentRequest {
        let mut contents: Vec<RequestContent> = Vec::new();
        let mut system_instruction = None;
        let mut call_names: HashMap<String, String> = HashMap::new();

        for msg in messages {
            match msg {
                Message::System { content } => {
                    if system_instruction.is_none() {
                        system_instruction = Some(SystemInstruction {
                            parts: vec![RequestPart::text(content.clone())],
                        });
                    }
                }
                Message::User { content } => {
                    contents.push(RequestContent {
                        role: "user".to_string(),
                        parts: vec![RequestPart::text(content.clone())],
                    });
                }
                Message::Assistant {
                    content,
                    tool_calls,
                } => {
                    let mut parts = Vec::new();
                    let text = content.joined();
                    if !text.is_empty() {
                        parts.push(RequestPart::text(text));
                    }
                    for call in tool_calls {
                        call_names.insert(call.id.clone(), call.name.clone());
                        parts.push(RequestPart {
                            function_call: Some(FunctionCall {
                                name: call.name.clone(),
                                args: call.args.clone(),
                            }),
                            ..Default::default()
                        });
                    }
                    contents.push(RequestContent {
                        role: "model".to_string(),
                        parts,
                    });
                }
                Message::ToolResult { call_id, payload } => {
                    let name = call_names
                        .get(call_id)
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string());
                    // functionResponse.response must be an object
                    let response = if payload.is_object() {
                        payload.clone()
                    } else {
                        json!({ "result": payload })
                    };
                    let part = RequestPart {
                        function_response: Some(FunctionResponse { name, response }),
                        ..Default::default()
                    };
                    // Batch results answer one model message; keep them in
                    // one user entry so parallel calls stay paired.
                    match contents.last_mut() {
                        Some(last)
                            if last.role == "user"
                                && last.parts.iter().all(|p| p.function_response.is_some()) =>
                        {
                            last.parts.push(part);
                        }
                        _ => contents.push(RequestContent {
                            role: "user".to_string(),
                            parts: vec![part],
                        }),
                    }
                }
            }
        }

        let tool_declarations = if tools.is_empty() {
            None
        } else {
            Some(vec![ToolDeclarations {
                function_declarations: tools
                    .iter()
                    .map(|t| FunctionDeclaration {
                        name: t.name.to_string(),
                        description: t.description.to_string(),
                        parameters: t.parameters.clone(),
                    })
                    .collect(),
            }])
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            tools: tool_declarations,
        }
    }

    fn parse_response(&self, parsed: GenerateContentResponse) -> Result<ModelResponse, LlmError> {
        if let Some(feedback) = &parsed.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(LlmError::Blocked(reason.clone()));
            }
        }

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Parse("response contains no candidates".to_string()))?;

        let mut content = String::new();
        let mut tool_calls = Vec::new();
        if let Some(candidate_content) = candidate.content {
            for part in candidate_content.parts {
                if let Some(text) = part.text {
                    content.push_str(&text);
                }
                if let Some(fc) = part.function_call {
                    // Gemini does not assign call ids; synthesize one so each
                    // result can be matched back to its invocation.
                    tool_calls.push(ToolCall {
                        id: uuid::Uuid::new_v4().to_string(),
                        name: fc.name,
                        args: if fc.args.is_null() {
                            json!({})
                        } else {
                            fc.args
                        },
                    });
                }
            }
        }

        Ok(ModelResponse {
            content,
            tool_calls,
        })
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelResponse, LlmError> {
        let request_body = self.build_request(messages, tools);

        tracing::debug!(
            model = %self.config.model,
            history_len = messages.len(),
            tool_count = tools.len(),
            "Calling Gemini API"
        );

        let response = self
            .http
            .post(self.api_url())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Request(format!("Failed to send request to Gemini API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Gemini API returned error status"
            );

            if status_code == 429 {
                return Err(LlmError::Quota(format!(
                    "Gemini API rate limit exceeded (HTTP 429): {}",
                    error_body
                )));
            }

            return Err(LlmError::Request(format!(
                "Gemini API returned error status {}: {}",
                status_code, error_body
            )));
        }

        let response_body = response
            .text()
            .await
            .map_err(|e| LlmError::Request(format!("Failed to read response body: {}", e)))?;

        let parsed: GenerateContentResponse = serde_json::from_str(&response_body)
            .map_err(|e| LlmError::Parse(format!("{} - Response body: {}", e, response_body)))?;

        let model_response = self.parse_response(parsed)?;

        tracing::debug!(
            response_len = model_response.content.len(),
            tool_calls = model_response.tool_calls.len(),
            "Received Gemini response"
        );

        Ok(model_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AssistantContent;
    use crate::tools::tool_catalog;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    fn test_config(base_url: String) -> GeminiConfig {
        GeminiConfig {
            api_key: Some("test-key".to_string()),
            model: "gemini-2.5-flash".to_string(),
            base_url,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_new_without_api_key_returns_none() {
        let config = GeminiConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "http://localhost".to_string(),
            timeout_secs: 5,
        };
        assert!(GeminiClient::new(config).is_none());
    }

    #[test]
    fn test_build_request_maps_history() {
        let client = GeminiClient::new(test_config("http://localhost".to_string())).unwrap();
        let messages = vec![
            Message::System {
                content: "You are a travel planner.".to_string(),
            },
            Message::User {
                content: "Plan a trip".to_string(),
            },
            Message::Assistant {
                content: AssistantContent::Text(String::new()),
                tool_calls: vec![ToolCall {
                    id: "call_1".to_string(),
                    name: "get_weather_forecast".to_string(),
                    args: serde_json::json!({"location": "Paris", "date": "2024-06-10"}),
                }],
            },
            Message::ToolResult {
                call_id: "call_1".to_string(),
                payload: serde_json::json!({"temp_high_c": 24}),
            },
        ];

        let request = client.build_request(&messages, tool_catalog());
        assert!(request.system_instruction.is_some());
        // System message is excluded from contents
        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[1].role, "model");
        assert_eq!(request.contents[2].role, "user");

        // Tool result resolves its function name through the call id
        let response_part = &request.contents[2].parts[0];
        assert_eq!(
            response_part.function_response.as_ref().unwrap().name,
            "get_weather_forecast"
        );

        let declarations = request.tools.unwrap();
        assert_eq!(declarations[0].function_declarations.len(), 3);
    }

    #[tokio::test]
    #[serial]
    async fn test_invoke_returns_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {
                            "parts": [{"text": "Where would you like to go?"}],
                            "role": "model"
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new(test_config(server.url())).unwrap();
        let messages = vec![Message::User {
            content: "Hi".to_string(),
        }];
        let result = client.invoke(&messages, &[]).await;

        mock.assert_async().await;
        let response = result.unwrap();
        assert_eq!(response.content, "Where would you like to go?");
        assert!(response.tool_calls.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_invoke_parses_function_calls() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {
                            "parts": [{
                                "functionCall": {
                                    "name": "get_weather_forecast",
                                    "args": {"location": "Paris", "date": "2024-06-10"}
                                }
                            }],
                            "role": "model"
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new(test_config(server.url())).unwrap();
        let messages = vec![Message::User {
            content: "Weather in Paris?".to_string(),
        }];
        let result = client.invoke(&messages, tool_catalog()).await;

        mock.assert_async().await;
        let response = result.unwrap();
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "get_weather_forecast");
        assert!(!response.tool_calls[0].id.is_empty());
        assert_eq!(response.tool_calls[0].args["location"], "Paris");
    }

    #[tokio::test]
    #[serial]
    async fn test_invoke_rate_limit_is_quota_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(429)
            .with_body(r#"{"error": "Rate limit exceeded"}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(test_config(server.url())).unwrap();
        let messages = vec![Message::User {
            content: "Hi".to_string(),
        }];
        let result = client.invoke(&messages, &[]).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(LlmError::Quota(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_invoke_blocked_prompt() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_body(
                r#"{
                    "candidates": [],
                    "promptFeedback": {"blockReason": "SAFETY"}
                }"#,
            )
            .create_async()
            .await;

        let client = GeminiClient::new(test_config(server.url())).unwrap();
        let messages = vec![Message::User {
            content: "Hi".to_string(),
        }];
        let result = client.invoke(&messages, &[]).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(LlmError::Blocked(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_invoke_invalid_json_is_parse_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let client = GeminiClient::new(test_config(server.url())).unwrap();
        let messages = vec![Message::User {
            content: "Hi".to_string(),
        }];
        let result = client.invoke(&messages, &[]).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
