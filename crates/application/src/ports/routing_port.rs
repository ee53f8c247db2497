//! Routing service port
//!
//! Defines the interface for directions requests between two points.
//! Adapters in the infrastructure layer implement this port using a
//! directions API.

use async_trait::async_trait;
use domain::{EncodedGeometry, GeoPoint};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A directed route request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    /// Start of the route
    pub origin: GeoPoint,
    /// End of the route
    pub destination: GeoPoint,
}

impl RouteRequest {
    /// Create a new route request
    #[must_use]
    pub const fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// One route proposed by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Encoded path of the route
    pub geometry: EncodedGeometry,
    /// Length in meters
    pub distance_meters: f64,
    /// Expected travel time in seconds
    pub duration_seconds: f64,
}

impl RouteCandidate {
    /// Candidate with geometry only
    #[must_use]
    pub const fn from_geometry(geometry: EncodedGeometry) -> Self {
        Self {
            geometry,
            distance_meters: 0.0,
            duration_seconds: 0.0,
        }
    }
}

/// Port for directions requests
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Request candidate routes, best first
    ///
    /// An empty vector means the provider found no route.
    async fn directions(
        &self,
        request: &RouteRequest,
    ) -> Result<Vec<RouteCandidate>, ApplicationError>;
}
