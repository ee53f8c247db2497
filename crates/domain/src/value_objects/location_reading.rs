//! Device location reading

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A position fix reported by the device, with the time it was captured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationReading {
    /// Where the device was
    pub coords: GeoPoint,
    /// When the fix was taken
    pub captured_at: DateTime<Utc>,
}

impl LocationReading {
    /// Create a reading captured at the given instant
    #[must_use]
    pub const fn new(coords: GeoPoint, captured_at: DateTime<Utc>) -> Self {
        Self {
            coords,
            captured_at,
        }
    }

    /// Create a reading captured now
    #[must_use]
    pub fn now(coords: GeoPoint) -> Self {
        Self::new(coords, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_keeps_coordinates() {
        let before = Utc::now();
        let reading = LocationReading::now(GeoPoint::new_unchecked(1.0, 2.0));
        assert_eq!(reading.coords, GeoPoint::new_unchecked(1.0, 2.0));
        assert!(reading.captured_at >= before);
    }
}
