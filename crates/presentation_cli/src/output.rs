//! Human-readable and JSON rendering of command results

use application::{Directions, LocationFix};
use domain::{GeoPoint, SessionState};
use serde::Serialize;

/// JSON document printed by `--json` runs
#[derive(Debug, Serialize)]
pub struct Report<'a, T: Serialize> {
    /// Command-specific result
    pub result: T,
    /// Session after the command ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<&'a SessionState>,
}

/// Render a point as `lat, lon` with five decimals
pub fn point_line(point: &GeoPoint) -> String {
    format!("{:.5}, {:.5}", point.latitude(), point.longitude())
}

/// One line per point, numbered from 1
pub fn path_lines(path: &[GeoPoint]) -> Vec<String> {
    path.iter()
        .enumerate()
        .map(|(i, point)| format!("{:>4}. {}", i + 1, point_line(point)))
        .collect()
}

/// Location summary for the `locate` command
pub fn location_line(fix: &LocationFix) -> String {
    let coords = point_line(&fix.reading().coords);
    if fix.is_stale() {
        format!("📍 {coords} (previous location, current position unavailable)")
    } else {
        format!("📍 {coords}")
    }
}

/// Distance and travel time summary for a route
pub fn directions_summary(directions: &Directions) -> String {
    let km = directions.distance_meters / 1000.0;
    let minutes = (directions.duration_seconds / 60.0).round();
    format!(
        "🛣️  {km:.1} km, about {minutes:.0} min, {} points",
        directions.path.len()
    )
}
