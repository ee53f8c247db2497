//! Routing data models
//!
//! Typed representations of OpenRouteService directions responses and
//! Nominatim search results.

use serde::{Deserialize, Serialize};

/// Response of a directions request, best candidate first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectionsResponse {
    /// Candidate routes; empty when the provider found nothing
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A single candidate route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// Encoded polyline of the route (1e5 precision)
    pub geometry: String,
    /// Length and travel time
    #[serde(default)]
    pub summary: RouteSummary,
}

/// Route length and duration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,
}

/// A place returned by a geocoding search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Human-readable name, when the provider supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directions_response() {
        let json = r#"{
            "routes": [
                {
                    "summary": { "distance": 1234.5, "duration": 185.0 },
                    "geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
                    "way_points": [0, 2]
                },
                {
                    "summary": { "distance": 2000.0, "duration": 300.0 },
                    "geometry": "??"
                }
            ],
            "metadata": { "service": "routing" }
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.routes.len(), 2);

        let best = &response.routes[0];
        assert_eq!(best.geometry, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert!((best.summary.distance - 1234.5).abs() < 1e-9);
        assert!((best.summary.duration - 185.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_routes_is_empty() {
        let response: DirectionsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.routes.is_empty());
    }

    #[test]
    fn test_route_without_summary() {
        let route: Route = serde_json::from_str(r#"{ "geometry": "??" }"#).unwrap();
        assert_eq!(route.summary, RouteSummary::default());
    }
}
