//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic point with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]. NaN is rejected by the same check.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a point without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `[longitude, latitude]` pair, the axis order used by GeoJSON-style APIs
    #[must_use]
    pub const fn lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = DomainError;

    /// Parse `"lat,lon"` (whitespace around either part is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or_else(|| {
            DomainError::ValidationError(format!("expected 'lat,lon', got '{s}'"))
        })?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| DomainError::ValidationError(format!("latitude '{lat}': {e}")))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|e| DomainError::ValidationError(format!("longitude '{lon}': {e}")))?;
        Self::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let point = GeoPoint::new(38.5, -120.2).expect("valid coordinates");
        assert!((point.latitude() - 38.5).abs() < f64::EPSILON);
        assert!((point.longitude() + 120.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_lon_lat_order() {
        let point = GeoPoint::new(52.52, 13.405).expect("valid");
        assert_eq!(point.lon_lat(), [13.405, 52.52]);
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(43.252, -126.453).expect("valid");
        assert_eq!(point.to_string(), "43.25200, -126.45300");
    }

    #[test]
    fn test_parse() {
        let point: GeoPoint = "52.52, 13.405".parse().expect("parse");
        assert_eq!(point, GeoPoint::new_unchecked(52.52, 13.405));

        assert!("52.52".parse::<GeoPoint>().is_err());
        assert!("north,13".parse::<GeoPoint>().is_err());
        assert!("95,13".parse::<GeoPoint>().is_err());
    }

    #[test]
    fn test_serialization() {
        let point = GeoPoint::new(52.52, 13.405).expect("valid");
        let json = serde_json::to_string(&point).expect("serialize");
        assert!(json.contains("\"latitude\":52.52"));

        let deserialized: GeoPoint = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(point, deserialized);
    }
}
