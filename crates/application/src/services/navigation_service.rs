//! Navigation service
//!
//! Entry point for the presentation layer. Dispatches the user actions
//! (search, directions, recenter) and startup initialization, and exposes the
//! session snapshot for rendering.

use std::sync::Arc;

use domain::{GeoPoint, RecenterTarget, SessionState};
use serde::Serialize;
use tracing::{info, instrument};

use super::geocoder::Geocoder;
use super::location_acquirer::LocationFix;
use super::route_planner::RoutePlanner;
use super::session_coordinator::SessionCoordinator;
use crate::error::ApplicationError;

/// Outcome of a sequenced request
///
/// `Superseded` results were computed but not written to the session because
/// a newer request of the same kind was issued while they were in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum Sequenced<T> {
    /// Applied to the session
    Latest(T),
    /// Dropped in favour of a newer request
    Superseded(T),
}

impl<T> Sequenced<T> {
    /// The computed value, applied or not
    pub fn into_inner(self) -> T {
        match self {
            Self::Latest(value) | Self::Superseded(value) => value,
        }
    }

    /// Whether the value was written to the session
    #[must_use]
    pub const fn is_latest(&self) -> bool {
        matches!(self, Self::Latest(_))
    }
}

/// A decoded route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directions {
    /// Points in traversal order
    pub path: Vec<GeoPoint>,
    /// Length in meters, 0 when the provider did not report it
    pub distance_meters: f64,
    /// Travel time in seconds, 0 when the provider did not report it
    pub duration_seconds: f64,
}

/// Application service behind the user-facing actions
#[derive(Debug)]
pub struct NavigationService {
    coordinator: Arc<SessionCoordinator>,
    geocoder: Geocoder,
    planner: RoutePlanner,
}

impl NavigationService {
    /// Create a new navigation service
    #[must_use]
    pub const fn new(
        coordinator: Arc<SessionCoordinator>,
        geocoder: Geocoder,
        planner: RoutePlanner,
    ) -> Self {
        Self {
            coordinator,
            geocoder,
            planner,
        }
    }

    /// The coordinator holding the session
    #[must_use]
    pub const fn coordinator(&self) -> &Arc<SessionCoordinator> {
        &self.coordinator
    }

    /// Acquire the device position and make the session ready
    ///
    /// # Errors
    ///
    /// `PermissionDenied` or `LocationUnavailable`; the session is then in
    /// the error phase.
    pub async fn initialize(&self) -> Result<LocationFix, ApplicationError> {
        self.coordinator.initialize().await
    }

    /// Resolve search text and make it the destination
    ///
    /// # Errors
    ///
    /// Geocoder errors; the destination is left unchanged. A blank query is
    /// rejected before it can supersede a search in flight.
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str) -> Result<Sequenced<GeoPoint>, ApplicationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApplicationError::EmptyQuery);
        }

        let ticket = self.coordinator.begin_search();
        let point = self.geocoder.resolve(text).await?;

        if self.coordinator.apply_destination(ticket, point) {
            info!(%point, "Destination updated");
            Ok(Sequenced::Latest(point))
        } else {
            Ok(Sequenced::Superseded(point))
        }
    }

    /// Route from the current position to the destination and store the path
    ///
    /// # Errors
    ///
    /// `MissingEndpoint` when either position is unknown, planner errors, or
    /// `Domain(MalformedGeometry)` when the returned geometry cannot be
    /// decoded. The stored path is unchanged on any error. A request with a
    /// missing endpoint never supersedes one in flight.
    #[instrument(skip(self))]
    pub async fn request_directions(&self) -> Result<Sequenced<Directions>, ApplicationError> {
        let (origin, destination) = {
            let state = self.coordinator.snapshot();
            (state.current_coords(), state.destination)
        };

        let request = RoutePlanner::request_for(origin, destination)?;

        let ticket = self.coordinator.begin_directions();
        let candidate = self.planner.plan_request(&request).await?;
        let path = candidate.geometry.decode()?;

        let directions = Directions {
            path,
            distance_meters: candidate.distance_meters,
            duration_seconds: candidate.duration_seconds,
        };

        if self
            .coordinator
            .apply_path(ticket, directions.path.clone())?
        {
            info!(points = directions.path.len(), "Route updated");
            Ok(Sequenced::Latest(directions))
        } else {
            Ok(Sequenced::Superseded(directions))
        }
    }

    /// Camera target for the recenter action
    ///
    /// # Errors
    ///
    /// `RecenterUnavailable` when the requested position is unknown.
    pub fn recenter(&self, which: RecenterTarget) -> Result<GeoPoint, ApplicationError> {
        self.coordinator.recenter_target(which)
    }

    /// Read-only copy of the session
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.coordinator.snapshot()
    }
}
