//! Itinerary rendering
//!
//! Turns a validated itinerary document into a readable text block for the
//! CLI. Handles both document forms: a list of day objects and a mapping
//! from date to day object.

use serde_json::Value;

/// Render the current plan in a user-friendly format
///
/// Returns `None` when the document does not carry a renderable itinerary.
pub fn render_plan(plan: &Value) -> Option<String> {
    let itinerary = plan.get("itinerary")?;

    let days: Vec<&Value> = match itinerary {
        Value::Array(days) => days.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return None,
    };

    let mut out = String::from("\n--- Current Itinerary ---\n");
    for day in days {
        let Some(day) = day.as_object() else { continue };

        let date = day
            .get("date")
            .and_then(Value::as_str)
            .unwrap_or("Unknown Date");
        out.push_str(&format!("\n** {} **\n", date));

        if let Some(summary) = day.get("daily_summary").and_then(Value::as_str) {
            out.push_str(&format!("   Summary: {}\n", summary));
        }

        let Some(activities) = day.get("activities").and_then(Value::as_array) else {
            out.push_str("   No activities found for this day.\n");
            continue;
        };

        for activity in activities {
            let Some(activity) = activity.as_object() else {
                continue;
            };

            let name = activity
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("N/A");
            match activity.get("time").and_then(Value::as_str) {
                Some(time) if !time.is_empty() => {
                    out.push_str(&format!("- {} ({})\n", name, time));
                }
                _ => out.push_str(&format!("- {}\n", name)),
            }

            if let Some(description) = activity.get("description").and_then(Value::as_str) {
                out.push_str(&format!("    Desc: {}\n", description));
            }
            out.push_str(&format!("    Loc: {}\n", format_location(activity)));
            if let Some(budget) = activity.get("budget").and_then(Value::as_str) {
                out.push_str(&format!("    Budget: {}\n", budget));
            }
            if let Some(notes) = activity.get("notes").and_then(Value::as_str) {
                out.push_str(&format!("    Notes: {}\n", notes));
            }
        }
    }

    Some(out)
}

/// Best-effort location line: top-level address, then nested address, then
/// raw coordinates
fn format_location(activity: &serde_json::Map<String, Value>) -> String {
    if let Some(address) = activity.get("address").and_then(Value::as_str) {
        if !address.is_empty() {
            return address.to_string();
        }
    }
    if let Some(location) = activity.get("location").and_then(Value::as_object) {
        if let Some(address) = location.get("address").and_then(Value::as_str) {
            if !address.is_empty() {
                return address.to_string();
            }
        }
        let lat = location.get("latitude");
        let lon = location.get("longitude");
        if lat.is_some() || lon.is_some() {
            return format!(
                "Coords: (Lat: {}, Lon: {})",
                lat.unwrap_or(&Value::Null),
                lon.unwrap_or(&Value::Null)
            );
        }
    }
    "N/A".to_string()
}
