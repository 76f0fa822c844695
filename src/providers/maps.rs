//! Google Maps platform client
//!
//! Covers the three capabilities the tools need: geocoding, place text
//! search, and directions. Each call checks the provider's application-level
//! `status` field in addition to the HTTP status.

use crate::config::MapsConfig;
use crate::error::ProviderError;
use crate::providers::{GeoPoint, MapsApi, PlaceRecord, RouteLeg};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Google Maps HTTP client
pub struct GoogleMapsClient {
    api_key: String,
    config: MapsConfig,
    http: reqwest::Client,
}

#[derive(Deserialize, Debug)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize, Debug)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize, Debug)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize, Debug)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize, Debug)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Deserialize, Debug)]
struct PlaceResult {
    place_id: Option<String>,
    name: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    price_level: Option<i64>,
    types: Option<Vec<String>>,
    business_status: Option<String>,
}

#[derive(Deserialize, Debug)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize, Debug)]
struct Route {
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Deserialize, Debug)]
struct Leg {
    duration: TextValue,
    distance: TextValue,
}

#[derive(Deserialize, Debug)]
struct TextValue {
    text: String,
    value: i64,
}

impl GoogleMapsClient {
    /// Create a client from configuration
    ///
    /// Returns `None` when no API key is configured; place and route tools
    /// then answer with their documented degraded responses.
    pub fn new(config: MapsConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        tracing::info!("Google Maps client initialized");
        Some(Self {
            api_key,
            config,
            http,
        })
    }
}

#[async_trait]
impl MapsApi for GoogleMapsClient {
    async fn geocode(&self, location: &str) -> Result<Option<GeoPoint>, ProviderError> {
        let url = format!("{}/geocode/json", self.config.base_url);
        let response: GeocodeResponse = self
            .http
            .get(&url)
            .query(&[("address", location), ("key", &self.api_key)])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::debug!(location = %location, status = %response.status, "Geocode response");

        match response.status.as_str() {
            "OK" => Ok(response.results.first().map(|r| GeoPoint {
                lat: r.geometry.location.lat,
                lon: r.geometry.location.lng,
            })),
            "ZERO_RESULTS" => Ok(None),
            other => Err(ProviderError::Status(other.to_string())),
        }
    }

    async fn search_places(&self, query: &str) -> Result<Vec<PlaceRecord>, ProviderError> {
        let url = format!("{}/place/textsearch/json", self.config.base_url);
        let response: PlacesResponse = self
            .http
            .get(&url)
            .query(&[("query", query), ("key", &self.api_key)])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::debug!(
            query = %query,
            status = %response.status,
            result_count = response.results.len(),
            "Place search response"
        );

        if response.status != "OK" {
            return Err(ProviderError::Status(response.status));
        }

        Ok(response
            .results
            .into_iter()
            .map(|p| PlaceRecord {
                place_id: p.place_id,
                name: p.name,
                formatted_address: p.formatted_address,
                location: p.geometry.map(|g| GeoPoint {
                    lat: g.location.lat,
                    lon: g.location.lng,
                }),
                rating: p.rating,
                user_ratings_total: p.user_ratings_total,
                price_level: p.price_level,
                types: p.types,
                business_status: p.business_status,
            })
            .collect())
    }

    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: &str,
        departure_time: Option<DateTime<Utc>>,
    ) -> Result<Option<RouteLeg>, ProviderError> {
        let url = format!("{}/directions/json", self.config.base_url);
        let mut query = vec![
            ("origin", format!("{},{}", origin.lat, origin.lon)),
            (
                "destination",
                format!("{},{}", destination.lat, destination.lon),
            ),
            ("mode", mode.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(departure) = departure_time {
            query.push(("departure_time", departure.timestamp().to_string()));
        }

        let response: DirectionsResponse = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::debug!(mode = %mode, status = %response.status, "Directions response");

        match response.status.as_str() {
            "OK" => Ok(response
                .routes
                .first()
                .and_then(|r| r.legs.first())
                .map(|leg| RouteLeg {
                    duration_text: leg.duration.text.clone(),
                    duration_seconds: leg.duration.value,
                    distance_text: leg.distance.text.clone(),
                    distance_meters: leg.distance.value,
                })),
            "ZERO_RESULTS" => Ok(None),
            other => Err(ProviderError::Status(other.to_string())),
        }
    }
}
