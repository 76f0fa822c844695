//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. A missing API key degrades the corresponding
//! client rather than failing startup.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini model client configuration
    pub gemini: GeminiConfig,
    /// Google Maps platform configuration
    pub maps: MapsConfig,
    /// OpenWeather configuration
    pub weather: WeatherConfig,
    /// Turn state-machine configuration
    pub agent: AgentConfig,
}

/// Gemini model client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` leaves the planner in degraded mode
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL (overridable for testing)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Google Maps platform configuration
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key; `None` leaves place/route tools in degraded mode
    pub api_key: Option<String>,
    /// API base URL (overridable for testing)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// OpenWeather configuration
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// API key; `None` leaves the forecast tool in degraded mode
    pub api_key: Option<String>,
    /// One Call endpoint URL (overridable for testing)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Turn state-machine configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum planner/tool round trips per turn
    pub max_round_trips: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_round_trips: 25,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(60),
            },
            maps: MapsConfig {
                api_key: env::var("MAPS_API_KEY").ok().filter(|k| !k.is_empty()),
                base_url: "https://maps.googleapis.com/maps/api".to_string(),
                timeout_secs: 10,
            },
            weather: WeatherConfig {
                api_key: env::var("WEATHER_API_KEY").ok().filter(|k| !k.is_empty()),
                base_url: "https://api.openweathermap.org/data/3.0/onecall".to_string(),
                timeout_secs: 10,
            },
            agent: AgentConfig {
                max_round_trips: env::var("MAX_ROUND_TRIPS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(25),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_config_default_bound() {
        let config = AgentConfig::default();
        assert_eq!(config.max_round_trips, 25);
    }

    #[test]
    fn test_from_env_has_defaults() {
        let config = Config::from_env();
        assert!(!config.gemini.model.is_empty());
        assert!(config.gemini.base_url.starts_with("https://"));
        assert!(config.agent.max_round_trips > 0);
    }
}
