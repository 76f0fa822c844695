//! Turn orchestration
//!
//! Sequences one conversational turn: planner step, tool dispatch loop, and
//! plan extraction. The agent is stateless between turns; all conversation
//! state lives in the caller-owned [`PlanState`] value.

use crate::agent::{extractor, planner};
use crate::config::AgentConfig;
use crate::llm::LanguageModel;
use crate::state::{Message, PlanState};
use crate::tools::ToolExecutor;
use std::sync::Arc;

/// Routing outcome evaluated after each planner step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The latest assistant message requests tools; execute them and loop
    CallTools,
    /// The latest assistant message is final; scan it for a plan
    ParsePlan,
    /// The latest message is not an assistant message; stop without a plan
    ErrorEnd,
}

/// Route based on the shape of the latest message
fn route_after_planner(state: &PlanState) -> RouteDecision {
    match state.last_message() {
        Some(Message::Assistant { tool_calls, .. }) if !tool_calls.is_empty() => {
            RouteDecision::CallTools
        }
        Some(Message::Assistant { .. }) => RouteDecision::ParsePlan,
        _ => RouteDecision::ErrorEnd,
    }
}

/// The conversational travel-planning agent
///
/// Holds the injected model and tool providers; receives the conversation
/// state by value for one turn at a time and returns the updated value.
pub struct TravelAgent {
    llm: Option<Arc<dyn LanguageModel>>,
    tools: ToolExecutor,
    config: AgentConfig,
}

impl TravelAgent {
    /// Create an agent over the given model client and tool executor
    pub fn new(llm: Option<Arc<dyn LanguageModel>>, tools: ToolExecutor, config: AgentConfig) -> Self {
        Self { llm, tools, config }
    }

    /// Run one complete turn for a new user message
    ///
    /// Appends the user message, then loops planner step -> tool execution
    /// until the model answers without tool calls (plan extraction) or the
    /// round-trip bound is hit. The returned state always reflects every
    /// message appended before the turn ended; nothing is raised past this
    /// boundary.
    pub async fn run_turn(&self, mut state: PlanState, user_text: impl Into<String>) -> PlanState {
        state.messages.push(Message::User {
            content: user_text.into(),
        });
        state.error = None;

        for round_trip in 0..self.config.max_round_trips {
            planner::run_planner(self.llm.as_deref(), &mut state).await;

            // A failed planner step already carries its diagnostic (and an
            // apology message when one applies); neither tool execution nor
            // plan extraction runs for this turn.
            if state.error.is_some() {
                return state;
            }

            match route_after_planner(&state) {
                RouteDecision::CallTools => {
                    tracing::info!(round_trip, "Routing to tool executor");
                    let calls = state
                        .last_message()
                        .map(|m| m.tool_calls().to_vec())
                        .unwrap_or_default();
                    let results = self.tools.execute_batch(&calls).await;
                    state.messages.extend(results);
                    state.error = None;
                }
                RouteDecision::ParsePlan => {
                    tracing::info!(round_trip, "Routing to plan extraction");
                    extractor::extract_plan(&mut state);
                    return state;
                }
                RouteDecision::ErrorEnd => {
                    tracing::warn!(
                        round_trip,
                        "Unexpected message shape after planner, ending turn"
                    );
                    return state;
                }
            }
        }

        tracing::error!(
            limit = self.config.max_round_trips,
            "Round-trip bound exceeded, aborting turn"
        );
        state.error = Some(format!(
            "Turn aborted: exceeded {} planner round trips.",
            self.config.max_round_trips
        ));
        state
    }
}
