//! uTravel Agent Library
//!
//! Conversational travel-itinerary agent: a turn-based orchestrator that
//! drives a Gemini-backed planning dialogue, executes model-requested
//! lookups (weather, places, travel time), and extracts structured
//! itinerary documents from model output.
//!
//! The main binary is in `src/main.rs`.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod providers;
pub mod state;
pub mod tools;
