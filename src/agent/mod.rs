//! Turn state machine
//!
//! The orchestration core: the planner step that invokes the model, the
//! tool-dispatch loop, and the plan extractor, sequenced per turn by
//! [`TravelAgent::run_turn`].

mod extractor;
mod graph;
mod planner;
mod prompt;
mod render;

pub use graph::{RouteDecision, TravelAgent};
pub use prompt::SYSTEM_PROMPT;
pub use render::render_plan;
