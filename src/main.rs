//! uTravel Agent CLI
//!
//! Interactive chat loop around the turn state machine. Owns the
//! conversation state across turns, persists nothing, and renders the
//! current itinerary after each completed turn.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use utravel_agent::agent::{render_plan, TravelAgent};
use utravel_agent::config::Config;
use utravel_agent::llm::GeminiClient;
use utravel_agent::providers::{ForecastApi, GoogleMapsClient, MapsApi, OpenWeatherClient};
use utravel_agent::state::{Message, PlanState};
use utravel_agent::tools::ToolExecutor;

/// True when the assistant text is a raw itinerary blob the renderer will
/// display instead
fn is_plan_blob(text: &str) -> bool {
    let trimmed = text.trim();
    text.contains("\"itinerary\"") && (trimmed.starts_with('{') || text.contains("```json"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!(model = %config.gemini.model, "Configuration loaded");

    let llm = GeminiClient::new(config.gemini.clone())
        .map(|client| Arc::new(client) as Arc<dyn utravel_agent::llm::LanguageModel>);
    if llm.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; turns will end with an initialization error");
    }

    let maps =
        GoogleMapsClient::new(config.maps.clone()).map(|c| Arc::new(c) as Arc<dyn MapsApi>);
    if maps.is_none() {
        tracing::warn!("MAPS_API_KEY not set; place and route tools run in degraded mode");
    }
    let forecast =
        OpenWeatherClient::new(config.weather.clone()).map(|c| Arc::new(c) as Arc<dyn ForecastApi>);
    if forecast.is_none() {
        tracing::warn!("WEATHER_API_KEY not set; the weather tool runs in degraded mode");
    }

    let agent = TravelAgent::new(llm, ToolExecutor::new(maps, forecast), config.agent.clone());

    println!("--- Welcome to uTravel: Your Friendly AI Travel Companion! ---");
    println!("Tell me about your travel wishes! For example, 'I'd like a 3-day adventure in Paris focusing on museums and cafes.'");
    println!("Whenever you're ready to end our chat, just type 'exit' or 'quit.'");

    let mut state = PlanState::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\nYou: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let user_input = line.trim().to_string();
        if user_input.is_empty() {
            continue;
        }
        if user_input.eq_ignore_ascii_case("exit") || user_input.eq_ignore_ascii_case("quit") {
            println!("Thanks for chatting with uTravel. Safe travels!");
            break;
        }

        println!("uTravel is crafting your journey...");
        state = agent.run_turn(state, user_input).await;

        let last_assistant = state.messages.iter().rev().find_map(|m| match m {
            Message::Assistant {
                content,
                tool_calls,
            } => Some((content.joined(), tool_calls.is_empty())),
            _ => None,
        });

        match &last_assistant {
            Some((text, _)) if is_plan_blob(text) => {
                println!("\nuTravel: (Here's your personalized plan below!)");
            }
            Some((text, _)) if !text.is_empty() => {
                println!("\nuTravel: {}", text);
            }
            _ => {
                println!("\nuTravel: (I couldn't generate a response this time. Let's give it another try!)");
            }
        }

        if let Some(plan) = &state.current_plan {
            let final_assistant_is_plain = last_assistant
                .as_ref()
                .map(|(_, no_tools)| *no_tools)
                .unwrap_or(false);
            if final_assistant_is_plain {
                if let Some(rendered) = render_plan(plan) {
                    println!("{}", rendered);
                }
            }
        }

        if let Some(error) = &state.error {
            println!("\nHeads up: There was an issue while planning: {}", error);
        }
    }

    println!("\n--- Thank you for using uTravel. Until next time! ---");
    Ok(())
}
