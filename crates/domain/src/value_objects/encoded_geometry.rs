//! Encoded route geometry as returned by a routing provider

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::errors::DomainError;
use crate::polyline;

/// Compact signed-delta polyline string at 1e5 precision
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedGeometry(String);

impl EncodedGeometry {
    /// Wrap a provider-supplied polyline string
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encode a sequence of points
    #[must_use]
    pub fn from_points(points: &[GeoPoint]) -> Self {
        Self(polyline::encode(points))
    }

    /// The raw encoded string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode into points
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedGeometry` if the string is not a valid
    /// encoded polyline.
    pub fn decode(&self) -> Result<Vec<GeoPoint>, DomainError> {
        polyline::decode(&self.0)
    }
}

impl fmt::Display for EncodedGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EncodedGeometry {
    fn from(value: String) -> Self {
        Self(value)
    }
}
