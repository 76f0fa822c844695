//! Travel time tool
//!
//! Computes duration and distance between two coordinate pairs. Unknown
//! travel modes fall back to driving; transit requests carry the current
//! time as departure time.

use crate::providers::{GeoPoint, MapsApi};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

const VALID_MODES: [&str; 4] = ["driving", "walking", "transit", "bicycling"];

#[derive(Deserialize, Debug)]
struct TravelArgs {
    origin_lat: f64,
    origin_lon: f64,
    dest_lat: f64,
    dest_lon: f64,
    mode: String,
}

/// Travel time and distance between two points
pub(crate) async fn get_travel_info(maps: Option<&dyn MapsApi>, args: Value) -> Value {
    let args: TravelArgs = match serde_json::from_value(args) {
        Ok(args) => args,
        Err(e) => return json!({"error": format!("Execution failed: {}", e)}),
    };

    tracing::info!(
        origin = %format!("({},{})", args.origin_lat, args.origin_lon),
        dest = %format!("({},{})", args.dest_lat, args.dest_lon),
        mode = %args.mode,
        "TOOL CALLED: get_travel_info"
    );

    let mut mode = args.mode.to_lowercase();
    if !VALID_MODES.contains(&mode.as_str()) {
        tracing::warn!(mode = %args.mode, "Unknown travel mode, falling back to driving");
        mode = "driving".to_string();
    }

    let origin = format!("({},{})", args.origin_lat, args.origin_lon);
    let destination = format!("({},{})", args.dest_lat, args.dest_lon);

    let Some(maps) = maps else {
        // Fixed stand-in so the planner keeps working without credentials
        return json!({
            "origin": origin,
            "destination": destination,
            "mode": mode,
            "duration_text": "15 mins",
            "duration_seconds": 900,
            "distance_text": "2.1 km",
            "distance_meters": 2100,
            "status": "OK_DUMMY"
        });
    };

    let departure_time = if mode == "transit" {
        Some(Utc::now())
    } else {
        None
    };

    let leg = maps
        .directions(
            GeoPoint {
                lat: args.origin_lat,
                lon: args.origin_lon,
            },
            GeoPoint {
                lat: args.dest_lat,
                lon: args.dest_lon,
            },
            &mode,
            departure_time,
        )
        .await;

    match leg {
        Ok(Some(leg)) => json!({
            "origin": origin,
            "destination": destination,
            "mode": mode,
            "duration_text": leg.duration_text,
            "duration_seconds": leg.duration_seconds,
            "distance_text": leg.distance_text,
            "distance_meters": leg.distance_meters,
            "status": "OK"
        }),
        Ok(None) => json!({"error": "No route found", "status": "ZERO_RESULTS"}),
        Err(e) => json!({
            "error": format!("Error getting travel info: {}", e),
            "status": "REQUEST_FAILED"
        }),
    }
}
