//! Tool invocation layer
//!
//! Executes the tool calls attached to the most recent assistant message and
//! answers every one of them with exactly one tool-result message. Failures
//! are isolated per call: one tool's error never prevents the rest of the
//! batch from executing, and nothing here raises past the layer boundary.

mod catalog;
mod places;
mod travel;
mod weather;

pub use catalog::{tool_catalog, ToolDefinition};

use crate::providers::{ForecastApi, MapsApi};
use crate::state::{Message, ToolCall};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Executes model-requested tool calls against the configured providers
///
/// Providers are injected at construction; an absent provider puts the
/// corresponding tools into their documented degraded mode instead of
/// failing the turn.
pub struct ToolExecutor {
    maps: Option<Arc<dyn MapsApi>>,
    forecast: Option<Arc<dyn ForecastApi>>,
}

impl ToolExecutor {
    /// Create an executor over the given providers
    pub fn new(maps: Option<Arc<dyn MapsApi>>, forecast: Option<Arc<dyn ForecastApi>>) -> Self {
        Self { maps, forecast }
    }

    /// Execute a batch of tool calls, producing one result message per call
    ///
    /// Results preserve invocation order. A call without an identifier is
    /// answered under a deterministic placeholder id rather than dropped, so
    /// the model's history stays valid.
    pub async fn execute_batch(&self, calls: &[ToolCall]) -> Vec<Message> {
        tracing::info!(
            count = calls.len(),
            names = ?calls.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "Executing tool calls"
        );

        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            if call.id.is_empty() {
                tracing::error!(tool = %call.name, "Tool call missing 'id'");
                results.push(Message::ToolResult {
                    call_id: format!("error_missing_id_{}", call.name),
                    payload: json!({"error": "Tool call missing 'id'."}),
                });
                continue;
            }

            let payload = self.dispatch(&call.name, call.args.clone()).await;
            tracing::debug!(
                tool = %call.name,
                call_id = %call.id,
                is_error = payload.get("error").is_some(),
                "Tool call resolved"
            );
            results.push(Message::ToolResult {
                call_id: call.id.clone(),
                payload,
            });
        }
        results
    }

    async fn dispatch(&self, name: &str, args: Value) -> Value {
        match name {
            "get_weather_forecast" => {
                weather::get_weather_forecast(self.maps.as_deref(), self.forecast.as_deref(), args)
                    .await
            }
            "find_places_nearby" => places::find_places_nearby(self.maps.as_deref(), args).await,
            "get_travel_info" => travel::get_travel_info(self.maps.as_deref(), args).await,
            other => {
                tracing::warn!(tool = %other, "LLM called unknown tool");
                json!({"error": format!("Unknown tool '{}' called.", other)})
            }
        }
    }
}

/// Serialize a tool's success value into its wire payload
///
/// A value that cannot be serialized resolves to an error payload instead of
/// propagating, so the call is still answered.
pub(crate) fn to_payload<T: Serialize>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "Tool output is not serializable");
            json!({"error": format!("Tool output serialization failed: {}", e)})
        }
    }
}
