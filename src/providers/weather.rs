//! OpenWeather One Call client
//!
//! Fetches the daily forecast block used by the weather tool. Current,
//! minutely, hourly, and alert data are excluded from the response.

use crate::config::WeatherConfig;
use crate::error::ProviderError;
use crate::providers::{DailyForecast, ForecastApi};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// OpenWeather HTTP client
pub struct OpenWeatherClient {
    api_key: String,
    config: WeatherConfig,
    http: reqwest::Client,
}

#[derive(Deserialize, Debug)]
struct OneCallResponse {
    #[serde(default)]
    daily: Vec<DailyEntry>,
}

#[derive(Deserialize, Debug)]
struct DailyEntry {
    dt: i64,
    temp: DailyTemp,
    #[serde(default)]
    weather: Vec<Condition>,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Deserialize, Debug)]
struct DailyTemp {
    min: f64,
    max: f64,
}

#[derive(Deserialize, Debug)]
struct Condition {
    main: String,
    description: String,
}

impl OpenWeatherClient {
    /// Create a client from configuration
    ///
    /// Returns `None` when no API key is configured.
    pub fn new(config: WeatherConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        tracing::info!("OpenWeather client initialized");
        Some(Self {
            api_key,
            config,
            http,
        })
    }
}

#[async_trait]
impl ForecastApi for OpenWeatherClient {
    async fn daily_forecast(&self, lat: f64, lon: f64) -> Result<Vec<DailyForecast>, ProviderError> {
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
                ("exclude", "current,minutely,hourly,alerts".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status(format!("HTTP {}: {}", status, body)));
        }

        let parsed: OneCallResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::debug!(lat, lon, days = parsed.daily.len(), "Forecast response");

        Ok(parsed
            .daily
            .into_iter()
            .map(|day| {
                let condition = day.weather.into_iter().next();
                DailyForecast {
                    dt: day.dt,
                    temp_min: day.temp.min,
                    temp_max: day.temp.max,
                    conditions_main: condition
                        .as_ref()
                        .map(|c| c.main.clone())
                        .unwrap_or_default(),
                    conditions_desc: condition.map(|c| c.description).unwrap_or_default(),
                    pop: day.pop,
                    summary: day.summary,
                }
            })
            .collect())
    }
}
