//! Weather forecast tool
//!
//! Resolves a location to coordinates via geocoding, fetches the daily
//! forecast, and selects the single day matching the requested date
//! (interpreted in UTC).

use crate::providers::{ForecastApi, MapsApi};
use crate::tools::to_payload;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Deserialize, Debug)]
struct WeatherArgs {
    location: String,
    date: String,
}

#[derive(Serialize, Debug)]
struct WeatherReport {
    date: String,
    location: String,
    latitude: f64,
    longitude: f64,
    temp_high_c: f64,
    temp_low_c: f64,
    conditions_main: String,
    conditions_desc: String,
    precip_prob_percent: f64,
    summary: String,
}

/// Daily forecast for a location and date
pub(crate) async fn get_weather_forecast(
    maps: Option<&dyn MapsApi>,
    forecast: Option<&dyn ForecastApi>,
    args: Value,
) -> Value {
    let args: WeatherArgs = match serde_json::from_value(args) {
        Ok(args) => args,
        Err(e) => return json!({"error": format!("Execution failed: {}", e)}),
    };

    tracing::info!(location = %args.location, date = %args.date, "TOOL CALLED: get_weather_forecast");

    let Some(forecast) = forecast else {
        return json!({"error": "Weather API key not configured."});
    };
    let Some(maps) = maps else {
        return json!({"error": "Maps service unavailable for geocoding."});
    };

    let target_date = match NaiveDate::parse_from_str(&args.date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return json!({
                "error": format!("Invalid date '{}': expected YYYY-MM-DD.", args.date)
            });
        }
    };

    let point = match maps.geocode(&args.location).await {
        Ok(Some(point)) => point,
        Ok(None) => {
            return json!({
                "error": format!("Could not find coordinates for location: {}", args.location)
            });
        }
        Err(e) => return json!({"error": format!("Geocoding error: {}", e)}),
    };

    let daily = match forecast.daily_forecast(point.lat, point.lon).await {
        Ok(daily) => daily,
        Err(e) => return json!({"error": format!("Weather API error: {}", e)}),
    };

    for day in daily {
        let forecast_date = DateTime::from_timestamp(day.dt, 0)
            .map(|dt| dt.date_naive());
        if forecast_date == Some(target_date) {
            return to_payload(&WeatherReport {
                date: args.date,
                location: args.location,
                latitude: point.lat,
                longitude: point.lon,
                temp_high_c: day.temp_max,
                temp_low_c: day.temp_min,
                conditions_main: day.conditions_main,
                conditions_desc: day.conditions_desc,
                precip_prob_percent: (day.pop * 1000.0).round() / 10.0,
                summary: day.summary.unwrap_or_default(),
            });
        }
    }

    json!({"error": format!("No forecast available for {}", args.date)})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::providers::{DailyForecast, GeoPoint, PlaceRecord, RouteLeg};
    use async_trait::async_trait;
    use chrono::Utc;

    struct FakeMaps {
        geocode_result: Option<GeoPoint>,
    }

    #[async_trait]
    impl MapsApi for FakeMaps {
        async fn geocode(&self, _location: &str) -> Result<Option<GeoPoint>, ProviderError> {
            Ok(self.geocode_result)
        }

        async fn search_places(&self, _query: &str) -> Result<Vec<PlaceRecord>, ProviderError> {
            Ok(vec![])
        }

        async fn directions(
            &self,
            _origin: GeoPoint,
            _destination: GeoPoint,
            _mode: &str,
            _departure_time: Option<chrono::DateTime<Utc>>,
        ) -> Result<Option<RouteLeg>, ProviderError> {
            Ok(None)
        }
    }

    struct FakeForecast {
        daily: Vec<DailyForecast>,
    }

    #[async_trait]
    impl ForecastApi for FakeForecast {
        async fn daily_forecast(
            &self,
            _lat: f64,
            _lon: f64,
        ) -> Result<Vec<DailyForecast>, ProviderError> {
            Ok(self.daily.clone())
        }
    }

    fn paris() -> FakeMaps {
        FakeMaps {
            geocode_result: Some(GeoPoint {
                lat: 48.8566,
                lon: 2.3522,
            }),
        }
    }

    fn clear_day(dt: i64) -> DailyForecast {
        DailyForecast {
            dt,
            temp_min: 15.0,
            temp_max: 24.0,
            conditions_main: "Clear".to_string(),
            conditions_desc: "clear sky".to_string(),
            pop: 0.1,
            summary: None,
        }
    }

    // Midnight UTC on 2024-06-10
    const JUNE_10: i64 = 1_717_977_600;

    #[tokio::test]
    async fn test_forecast_for_matching_day() {
        let maps = paris();
        let forecast = FakeForecast {
            daily: vec![clear_day(JUNE_10 - 86_400), clear_day(JUNE_10)],
        };

        let result = get_weather_forecast(
            Some(&maps),
            Some(&forecast),
            json!({"location": "Paris", "date": "2024-06-10"}),
        )
        .await;

        assert_eq!(result["date"], "2024-06-10");
        assert_eq!(result["latitude"], 48.8566);
        assert_eq!(result["longitude"], 2.3522);
        assert_eq!(result["temp_high_c"], 24.0);
        assert_eq!(result["temp_low_c"], 15.0);
        assert_eq!(result["conditions_main"], "Clear");
        assert_eq!(result["conditions_desc"], "clear sky");
        assert_eq!(result["precip_prob_percent"], 10.0);
    }

    #[tokio::test]
    async fn test_date_outside_horizon() {
        let maps = paris();
        let forecast = FakeForecast {
            daily: vec![clear_day(JUNE_10)],
        };

        let result = get_weather_forecast(
            Some(&maps),
            Some(&forecast),
            json!({"location": "Paris", "date": "2030-01-01"}),
        )
        .await;

        assert_eq!(result["error"], "No forecast available for 2030-01-01");
    }

    #[tokio::test]
    async fn test_invalid_date_string() {
        let maps = paris();
        let forecast = FakeForecast { daily: vec![] };

        let result = get_weather_forecast(
            Some(&maps),
            Some(&forecast),
            json!({"location": "Paris", "date": "June 10th"}),
        )
        .await;

        let error = result["error"].as_str().unwrap();
        assert!(error.contains("YYYY-MM-DD"), "got: {}", error);
    }

    #[tokio::test]
    async fn test_geocode_miss() {
        let maps = FakeMaps {
            geocode_result: None,
        };
        let forecast = FakeForecast { daily: vec![] };

        let result = get_weather_forecast(
            Some(&maps),
            Some(&forecast),
            json!({"location": "Atlantis", "date": "2024-06-10"}),
        )
        .await;

        assert_eq!(
            result["error"],
            "Could not find coordinates for location: Atlantis"
        );
    }

    #[tokio::test]
    async fn test_missing_weather_key() {
        let maps = paris();
        let result = get_weather_forecast(
            Some(&maps),
            None,
            json!({"location": "Paris", "date": "2024-06-10"}),
        )
        .await;

        assert_eq!(result["error"], "Weather API key not configured.");
    }

    #[tokio::test]
    async fn test_missing_maps_client() {
        let forecast = FakeForecast { daily: vec![] };
        let result = get_weather_forecast(
            None,
            Some(&forecast),
            json!({"location": "Paris", "date": "2024-06-10"}),
        )
        .await;

        assert_eq!(result["error"], "Maps service unavailable for geocoding.");
    }
}
