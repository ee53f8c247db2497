//! Directions between the current position and a destination

use std::sync::Arc;

use domain::{EncodedGeometry, GeoPoint};
use tracing::{debug, instrument};

use crate::error::{ApplicationError, RouteEndpoint};
use crate::ports::{RouteCandidate, RouteRequest, RoutingPort};

/// Requests a single route and keeps only the provider's best candidate
pub struct RoutePlanner {
    port: Arc<dyn RoutingPort>,
}

impl std::fmt::Debug for RoutePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanner").finish_non_exhaustive()
    }
}

impl RoutePlanner {
    /// Create a new route planner
    #[must_use]
    pub fn new(port: Arc<dyn RoutingPort>) -> Self {
        Self { port }
    }

    /// Build a request, failing if either endpoint is unknown
    ///
    /// # Errors
    ///
    /// `MissingEndpoint` naming the first absent endpoint.
    pub fn request_for(
        origin: Option<GeoPoint>,
        destination: Option<GeoPoint>,
    ) -> Result<RouteRequest, ApplicationError> {
        let origin = origin.ok_or(ApplicationError::MissingEndpoint(RouteEndpoint::Origin))?;
        let destination =
            destination.ok_or(ApplicationError::MissingEndpoint(RouteEndpoint::Destination))?;
        Ok(RouteRequest::new(origin, destination))
    }

    /// Best candidate route between the endpoints
    ///
    /// # Errors
    ///
    /// `MissingEndpoint` without any request when an endpoint is absent,
    /// `RouteNotFound` when the provider returns no candidates, `Transport`
    /// for network failures. Nothing is retried.
    #[instrument(skip(self))]
    pub async fn plan(
        &self,
        origin: Option<GeoPoint>,
        destination: Option<GeoPoint>,
    ) -> Result<RouteCandidate, ApplicationError> {
        let request = Self::request_for(origin, destination)?;
        self.plan_request(&request).await
    }

    /// Best candidate route for an already validated request
    ///
    /// # Errors
    ///
    /// `RouteNotFound` when the provider returns no candidates, `Transport`
    /// for network failures.
    #[instrument(skip(self))]
    pub async fn plan_request(
        &self,
        request: &RouteRequest,
    ) -> Result<RouteCandidate, ApplicationError> {
        let candidates = self.port.directions(request).await?;
        debug!(count = candidates.len(), "Route candidates received");

        candidates
            .into_iter()
            .next()
            .ok_or(ApplicationError::RouteNotFound)
    }

    /// Encoded geometry of the best route between the endpoints
    ///
    /// # Errors
    ///
    /// Same as [`RoutePlanner::plan`].
    pub async fn route(
        &self,
        origin: Option<GeoPoint>,
        destination: Option<GeoPoint>,
    ) -> Result<EncodedGeometry, ApplicationError> {
        self.plan(origin, destination)
            .await
            .map(|candidate| candidate.geometry)
    }
}
