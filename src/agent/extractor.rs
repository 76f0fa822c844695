//! Plan extractor
//!
//! Locates and validates an itinerary document embedded in the latest
//! assistant message. The extraction is heuristic by design: a fenced
//! ```json block takes priority, then a brace-delimited slice of the raw
//! text. Both strategies and their priority order are load-bearing, since
//! validation depends on which slice was chosen.

use crate::state::{Message, PlanState};
use serde_json::Value;

const ITINERARY_MARKER: &str = "\"itinerary\"";
const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Scan the latest message for an itinerary document and update the state
///
/// Only a final assistant message with no pending tool calls is scanned.
/// On acceptance the current plan is replaced wholesale and the error is
/// cleared; on parse or structure failure the error is set and the prior
/// plan is left unchanged.
pub(crate) fn extract_plan(state: &mut PlanState) {
    let candidate: Option<String> = match state.last_message() {
        Some(Message::Assistant {
            content,
            tool_calls,
        }) if tool_calls.is_empty() => content
            .fragments()
            .find(|fragment| {
                let trimmed = fragment.trim();
                fragment.contains(ITINERARY_MARKER)
                    && (trimmed.starts_with('{') || trimmed.contains(FENCE_OPEN))
            })
            .map(str::to_string),
        Some(Message::Assistant { .. }) => {
            tracing::debug!("Last assistant message still requests tools, no plan to parse");
            return;
        }
        _ => {
            tracing::debug!("Last message is not an assistant message, no plan to parse");
            return;
        }
    };

    let Some(text) = candidate else {
        // No plan offered this turn; a stale diagnostic from an earlier
        // failed extraction is cleared.
        if state.error.is_some() {
            state.error = None;
        }
        return;
    };

    match parse_candidate(&text) {
        Ok(plan) => match validate_structure(&plan) {
            Ok(()) => {
                tracing::info!("Itinerary document accepted as new plan");
                state.current_plan = Some(plan);
                state.error = None;
            }
            Err(diagnostic) => {
                tracing::warn!(diagnostic = %diagnostic, "Itinerary document rejected");
                state.error = Some(diagnostic);
            }
        },
        Err(diagnostic) => {
            tracing::warn!(diagnostic = %diagnostic, "Plan candidate failed to parse");
            state.error = Some(diagnostic);
        }
    }
}

/// Slice the candidate text down to a JSON document and parse it
fn parse_candidate(text: &str) -> Result<Value, String> {
    let json_str = if let Some(open) = text.find(FENCE_OPEN) {
        // Content strictly between the fence-open and the next fence-close;
        // an unterminated fence falls through to the end of the text.
        let after = &text[open + FENCE_OPEN.len()..];
        match after.find(FENCE_CLOSE) {
            Some(close) => after[..close].trim(),
            None => after.trim(),
        }
    } else {
        let trimmed = text.trim();
        if trimmed.starts_with('{') {
            trimmed
        } else {
            let start = text.find('{');
            let end = text.rfind('}');
            match (start, end) {
                (Some(start), Some(end)) if start < end => &text[start..=end],
                _ => {
                    return Err(
                        "Failed to parse final plan JSON: no clear JSON object boundaries found"
                            .to_string(),
                    );
                }
            }
        }
    };

    serde_json::from_str(json_str)
        .map_err(|e| format!("Failed to parse final plan JSON: {}", e))
}

/// Accept only an object whose `itinerary` value is an object or a list
fn validate_structure(plan: &Value) -> Result<(), String> {
    let valid = plan
        .as_object()
        .and_then(|obj| obj.get("itinerary"))
        .map(|itinerary| itinerary.is_object() || itinerary.is_array())
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err("Parsed JSON has incorrect structure.".to_string())
    }
}
