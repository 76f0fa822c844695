//! Place search tool
//!
//! Builds a single free-text query (keyword > interests > place_type) and
//! maps provider results to a fixed record shape, capped at 15 entries.

use crate::providers::MapsApi;
use crate::tools::to_payload;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Maximum number of place records returned to the model
const MAX_RESULTS: usize = 15;

#[derive(Deserialize, Debug)]
struct PlacesArgs {
    city: String,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    place_type: Option<String>,
}

#[derive(Serialize, Debug)]
struct PlaceSummary {
    place_id: Option<String>,
    name: Option<String>,
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    price_level_str: String,
    types: Option<Vec<String>>,
    status: Option<String>,
}

/// Maps a Places price level (0-4) to a human-readable tier
fn map_price_level(level: Option<i64>) -> String {
    match level {
        Some(0) => "Free".to_string(),
        Some(1) => "$".to_string(),
        Some(2) => "$$".to_string(),
        Some(3) => "$$$".to_string(),
        Some(4) => "$$$$".to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Free-text place search in a city
pub(crate) async fn find_places_nearby(maps: Option<&dyn MapsApi>, args: Value) -> Value {
    let args: PlacesArgs = match serde_json::from_value(args) {
        Ok(args) => args,
        Err(e) => return json!([{"error": format!("Execution failed: {}", e)}]),
    };

    tracing::info!(
        city = %args.city,
        interests = ?args.interests,
        keyword = ?args.keyword,
        place_type = ?args.place_type,
        "TOOL CALLED: find_places_nearby"
    );

    let Some(maps) = maps else {
        return json!([{"error": "Maps service not available."}]);
    };

    // Query priority: keyword > interests > place_type
    let query = if let Some(keyword) = args.keyword.filter(|k| !k.is_empty()) {
        format!("{} in {}", keyword, args.city)
    } else if !args.interests.is_empty() {
        format!("{} in {}", args.interests.join(" "), args.city)
    } else if let Some(place_type) = args.place_type.filter(|t| !t.is_empty()) {
        format!("{} in {}", place_type, args.city)
    } else {
        return json!([{"error": "Must provide interests, keyword, or place_type."}]);
    };

    let places = match maps.search_places(&query).await {
        Ok(places) => places,
        Err(crate::error::ProviderError::Status(status)) => {
            return json!([{"error": format!("Places API error: {}", status)}]);
        }
        Err(e) => return json!([{"error": format!("Error finding places: {}", e)}]),
    };

    let summaries: Vec<PlaceSummary> = places
        .into_iter()
        .take(MAX_RESULTS)
        .map(|place| PlaceSummary {
            place_id: place.place_id,
            name: place.name,
            address: place.formatted_address,
            latitude: place.location.map(|l| l.lat),
            longitude: place.location.map(|l| l.lon),
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            price_level_str: map_price_level(place.price_level),
            types: place.types,
            status: place.business_status,
        })
        .collect();

    to_payload(&summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::providers::{GeoPoint, PlaceRecord, RouteLeg};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeMaps {
        results: Vec<PlaceRecord>,
        last_query: Mutex<Option<String>>,
        status_error: Option<String>,
    }

    impl FakeMaps {
        fn with_results(results: Vec<PlaceRecord>) -> Self {
            Self {
                results,
                last_query: Mutex::new(None),
                status_error: None,
            }
        }
    }

    #[async_trait]
    impl MapsApi for FakeMaps {
        async fn geocode(&self, _location: &str) -> Result<Option<GeoPoint>, ProviderError> {
            Ok(None)
        }

        async fn search_places(&self, query: &str) -> Result<Vec<PlaceRecord>, ProviderError> {
            *self.last_query.lock().unwrap() = Some(query.to_string());
            if let Some(status) = &self.status_error {
                return Err(ProviderError::Status(status.clone()));
            }
            Ok(self.results.clone())
        }

        async fn directions(
            &self,
            _origin: GeoPoint,
            _destination: GeoPoint,
            _mode: &str,
            _departure_time: Option<chrono::DateTime<chrono::Utc>>,
        ) -> Result<Option<RouteLeg>, ProviderError> {
            Ok(None)
        }
    }

    fn louvre() -> PlaceRecord {
        PlaceRecord {
            place_id: Some("place_louvre".to_string()),
            name: Some("Louvre Museum".to_string()),
            formatted_address: Some("Rue de Rivoli, 75001 Paris".to_string()),
            location: Some(GeoPoint {
                lat: 48.8606,
                lon: 2.3376,
            }),
            rating: Some(4.7),
            user_ratings_total: Some(250000),
            price_level: Some(2),
            types: Some(vec!["museum".to_string()]),
            business_status: Some("OPERATIONAL".to_string()),
        }
    }

    #[test]
    fn test_price_level_mapping() {
        assert_eq!(map_price_level(Some(0)), "Free");
        assert_eq!(map_price_level(Some(1)), "$");
        assert_eq!(map_price_level(Some(4)), "$$$$");
        assert_eq!(map_price_level(Some(7)), "Unknown");
        assert_eq!(map_price_level(None), "Unknown");
    }

    #[tokio::test]
    async fn test_keyword_takes_priority_over_interests() {
        let maps = FakeMaps::with_results(vec![]);
        find_places_nearby(
            Some(&maps),
            json!({
                "city": "Paris",
                "interests": ["museums", "cafes"],
                "keyword": "impressionist art"
            }),
        )
        .await;

        assert_eq!(
            maps.last_query.lock().unwrap().as_deref(),
            Some("impressionist art in Paris")
        );
    }

    #[tokio::test]
    async fn test_interests_joined_into_query() {
        let maps = FakeMaps::with_results(vec![]);
        find_places_nearby(
            Some(&maps),
            json!({"city": "Paris", "interests": ["museums", "cafes"]}),
        )
        .await;

        assert_eq!(
            maps.last_query.lock().unwrap().as_deref(),
            Some("museums cafes in Paris")
        );
    }

    #[tokio::test]
    async fn test_no_criteria_is_an_error() {
        let maps = FakeMaps::with_results(vec![]);
        let result = find_places_nearby(Some(&maps), json!({"city": "Paris"})).await;
        assert_eq!(
            result[0]["error"],
            "Must provide interests, keyword, or place_type."
        );
    }

    #[tokio::test]
    async fn test_record_shape_and_price_tier() {
        let maps = FakeMaps::with_results(vec![louvre()]);
        let result = find_places_nearby(
            Some(&maps),
            json!({"city": "Paris", "interests": ["museums"]}),
        )
        .await;

        let record = &result[0];
        assert_eq!(record["name"], "Louvre Museum");
        assert_eq!(record["address"], "Rue de Rivoli, 75001 Paris");
        assert_eq!(record["price_level_str"], "$$");
        assert_eq!(record["latitude"], 48.8606);
        assert_eq!(record["status"], "OPERATIONAL");
    }

    #[tokio::test]
    async fn test_results_capped_at_fifteen() {
        let maps = FakeMaps::with_results(vec![louvre(); 40]);
        let result = find_places_nearby(
            Some(&maps),
            json!({"city": "Paris", "interests": ["museums"]}),
        )
        .await;

        assert_eq!(result.as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_provider_status_error_is_reported() {
        let maps = FakeMaps {
            results: vec![],
            last_query: Mutex::new(None),
            status_error: Some("OVER_QUERY_LIMIT".to_string()),
        };
        let result = find_places_nearby(
            Some(&maps),
            json!({"city": "Paris", "interests": ["museums"]}),
        )
        .await;
        assert_eq!(result[0]["error"], "Places API error: OVER_QUERY_LIMIT");
    }

    #[tokio::test]
    async fn test_degraded_mode_without_maps() {
        let result =
            find_places_nearby(None, json!({"city": "Paris", "interests": ["museums"]})).await;
        assert_eq!(result[0]["error"], "Maps service not available.");
    }
}
