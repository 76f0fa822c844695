//! External capability providers
//!
//! Geocoding/places/directions and daily-forecast lookups, behind traits so
//! the tool layer can be exercised with substitutable fakes. Production
//! implementations are [`GoogleMapsClient`] and [`OpenWeatherClient`].

mod maps;
mod weather;

pub use maps::GoogleMapsClient;
pub use weather::OpenWeatherClient;

use crate::error::ProviderError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

/// One place record from a text search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Provider place identifier
    pub place_id: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Formatted street address
    pub formatted_address: Option<String>,
    /// Coordinates, when the provider returned them
    pub location: Option<GeoPoint>,
    /// Average rating
    pub rating: Option<f64>,
    /// Number of ratings behind the average
    pub user_ratings_total: Option<u64>,
    /// Integer price level (0-4)
    pub price_level: Option<i64>,
    /// Provider type tags
    pub types: Option<Vec<String>>,
    /// Operational status
    pub business_status: Option<String>,
}

/// One leg of a computed route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    /// Human-readable duration ("15 mins")
    pub duration_text: String,
    /// Duration in seconds
    pub duration_seconds: i64,
    /// Human-readable distance ("2.1 km")
    pub distance_text: String,
    /// Distance in meters
    pub distance_meters: i64,
}

/// One day of forecast data
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    /// Forecast day as a unix timestamp
    pub dt: i64,
    /// Daily minimum temperature (°C)
    pub temp_min: f64,
    /// Daily maximum temperature (°C)
    pub temp_max: f64,
    /// Primary condition ("Clear")
    pub conditions_main: String,
    /// Condition description ("clear sky")
    pub conditions_desc: String,
    /// Precipitation probability, 0.0-1.0
    pub pop: f64,
    /// Optional human-readable summary
    pub summary: Option<String>,
}

/// Geocoding, place search, and directions capabilities
#[async_trait]
pub trait MapsApi: Send + Sync {
    /// Resolve a free-text location to coordinates; `None` when nothing matched
    async fn geocode(&self, location: &str) -> Result<Option<GeoPoint>, ProviderError>;

    /// Free-text place search, in provider order
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceRecord>, ProviderError>;

    /// Compute a route between two points; `None` when no route exists
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: &str,
        departure_time: Option<DateTime<Utc>>,
    ) -> Result<Option<RouteLeg>, ProviderError>;
}

/// Daily-forecast capability
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// Per-day forecast records for the given coordinates
    async fn daily_forecast(&self, lat: f64, lon: f64) -> Result<Vec<DailyForecast>, ProviderError>;
}
