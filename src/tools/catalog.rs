//! Tool catalog
//!
//! Declarations for the three tools the planner may request, including the
//! argument schemas sent to the model.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// A declared tool: name, description, and argument schema
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Tool name as the model must request it
    pub name: &'static str,
    /// Description shown to the model
    pub description: &'static str,
    /// JSON schema for the argument object
    pub parameters: Value,
}

static CATALOG: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    vec![
        ToolDefinition {
            name: "get_weather_forecast",
            description: "Gets the daily weather forecast for a specific location and date.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "City or place name to look up."
                    },
                    "date": {
                        "type": "string",
                        "description": "Target date in YYYY-MM-DD format."
                    }
                },
                "required": ["location", "date"]
            }),
        },
        ToolDefinition {
            name: "find_places_nearby",
            description:
                "Finds relevant places in a city based on interests, keywords, or place types.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "City to search in."
                    },
                    "interests": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "User interests to search for."
                    },
                    "keyword": {
                        "type": "string",
                        "description": "Specific search keyword; takes priority over interests."
                    },
                    "place_type": {
                        "type": "string",
                        "description": "Place category, used when no keyword or interests are given."
                    }
                },
                "required": ["city"]
            }),
        },
        ToolDefinition {
            name: "get_travel_info",
            description: "Gets estimated travel time and distance between two points.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "origin_lat": {"type": "number", "description": "Origin latitude."},
                    "origin_lon": {"type": "number", "description": "Origin longitude."},
                    "dest_lat": {"type": "number", "description": "Destination latitude."},
                    "dest_lon": {"type": "number", "description": "Destination longitude."},
                    "mode": {
                        "type": "string",
                        "description": "Travel mode: driving, walking, transit, or bicycling."
                    }
                },
                "required": ["origin_lat", "origin_lon", "dest_lat", "dest_lon", "mode"]
            }),
        },
    ]
});

/// The declared tool catalog, in a fixed order
pub fn tool_catalog() -> &'static [ToolDefinition] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names() {
        let names: Vec<&str> = tool_catalog().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "get_weather_forecast",
                "find_places_nearby",
                "get_travel_info"
            ]
        );
    }

    #[test]
    fn test_catalog_schemas_are_objects() {
        for tool in tool_catalog() {
            assert_eq!(tool.parameters["type"], "object", "{}", tool.name);
            assert!(tool.parameters["properties"].is_object());
        }
    }
}
