//! Session state ownership and transitions
//!
//! [`SessionCoordinator`] is the only writer of [`SessionState`]. Every
//! mutation takes the write lock for the duration of a plain assignment, so a
//! concurrent [`SessionCoordinator::snapshot`] never sees a half-applied
//! update. Locks are never held across an `.await`.
//!
//! Searches and directions requests are sequenced: each one draws a ticket
//! from a per-field counter before it goes out, and its response is applied
//! only if no newer ticket has been issued for that field in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

use domain::{GeoPoint, RecenterTarget, SessionPhase, SessionState};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use super::location_acquirer::{LocationAcquirer, LocationFix};
use crate::error::{ApplicationError, RouteEndpoint};

/// Ticket for one in-flight search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DestinationTicket(u64);

/// Ticket for one in-flight directions request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathTicket(u64);

/// Holds the session state and applies every change to it
pub struct SessionCoordinator {
    state: RwLock<SessionState>,
    acquirer: LocationAcquirer,
    destination_requests: AtomicU64,
    path_requests: AtomicU64,
}

impl std::fmt::Debug for SessionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCoordinator")
            .field("phase", &self.state.read().phase)
            .field("acquirer", &self.acquirer)
            .finish_non_exhaustive()
    }
}

impl SessionCoordinator {
    /// Create a coordinator with an empty session in the acquiring phase
    #[must_use]
    pub fn new(acquirer: LocationAcquirer) -> Self {
        Self {
            state: RwLock::new(SessionState::new()),
            acquirer,
            destination_requests: AtomicU64::new(0),
            path_requests: AtomicU64::new(0),
        }
    }

    /// Read-only copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Run the location acquirer once and record the outcome
    ///
    /// A fresh reading becomes both `current` and `previous`. A stale fallback
    /// becomes `current` only. Terminal failures move the session to the
    /// error phase and leave both positions untouched. Never retries.
    ///
    /// # Errors
    ///
    /// Passes through `PermissionDenied` and `LocationUnavailable`.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<LocationFix, ApplicationError> {
        let previous = {
            let mut state = self.state.write();
            state.phase = SessionPhase::Acquiring;
            state.previous
        };

        let outcome = self.acquirer.acquire(previous).await;

        let mut state = self.state.write();
        match &outcome {
            Ok(LocationFix::Fresh(reading)) => {
                state.current = Some(*reading);
                state.previous = Some(*reading);
                state.current_is_stale = false;
                state.phase = SessionPhase::Ready;
                info!(coords = %reading.coords, "Session ready");
            },
            Ok(LocationFix::Stale(reading)) => {
                state.current = Some(*reading);
                state.current_is_stale = true;
                state.phase = SessionPhase::Ready;
                warn!(coords = %reading.coords, "Session ready with previous location");
            },
            Err(err) => {
                state.phase = SessionPhase::Error(err.user_message());
                warn!(error = %err, "Session failed to acquire location");
            },
        }

        outcome
    }

    /// Overwrite the destination; the path is left as it is
    pub fn set_destination(&self, point: GeoPoint) {
        self.state.write().destination = Some(point);
        debug!(%point, "Destination set");
    }

    /// Overwrite the route path
    ///
    /// # Errors
    ///
    /// `MissingEndpoint` when a non-empty path is given while no destination
    /// has been set.
    pub fn set_path(&self, points: Vec<GeoPoint>) -> Result<(), ApplicationError> {
        let mut state = self.state.write();
        Self::write_path(&mut state, points)
    }

    fn write_path(state: &mut SessionState, points: Vec<GeoPoint>) -> Result<(), ApplicationError> {
        if !points.is_empty() && state.destination.is_none() {
            return Err(ApplicationError::MissingEndpoint(RouteEndpoint::Destination));
        }
        debug!(points = points.len(), "Path set");
        state.path = points;
        Ok(())
    }

    /// Camera target for a recenter action
    ///
    /// # Errors
    ///
    /// `RecenterUnavailable` when the requested position is not known yet.
    pub fn recenter_target(&self, which: RecenterTarget) -> Result<GeoPoint, ApplicationError> {
        let state = self.state.read();
        let target = match which {
            RecenterTarget::Me => state.current_coords(),
            RecenterTarget::Search => state.destination,
        };
        target.ok_or(ApplicationError::RecenterUnavailable(which))
    }

    /// Issue a ticket for a new search, superseding all earlier ones
    pub fn begin_search(&self) -> DestinationTicket {
        DestinationTicket(self.destination_requests.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Issue a ticket for a new directions request, superseding all earlier ones
    pub fn begin_directions(&self) -> PathTicket {
        PathTicket(self.path_requests.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Set the destination if `ticket` is still the latest search
    ///
    /// Returns `false` when the response was superseded and dropped.
    pub fn apply_destination(&self, ticket: DestinationTicket, point: GeoPoint) -> bool {
        let mut state = self.state.write();
        let latest = self.destination_requests.load(Ordering::SeqCst);
        if ticket.0 != latest {
            debug!(ticket = ticket.0, latest, "Dropping superseded search result");
            return false;
        }
        state.destination = Some(point);
        debug!(%point, "Destination set");
        true
    }

    /// Set the path if `ticket` is still the latest directions request
    ///
    /// Returns `Ok(false)` when the response was superseded and dropped.
    ///
    /// # Errors
    ///
    /// Same as [`SessionCoordinator::set_path`].
    pub fn apply_path(
        &self,
        ticket: PathTicket,
        points: Vec<GeoPoint>,
    ) -> Result<bool, ApplicationError> {
        let mut state = self.state.write();
        let latest = self.path_requests.load(Ordering::SeqCst);
        if ticket.0 != latest {
            debug!(ticket = ticket.0, latest, "Dropping superseded route");
            return Ok(false);
        }
        Self::write_path(&mut state, points)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use domain::LocationReading;

    use super::*;
    use crate::ports::{MockDeviceLocationPort, PermissionStatus, PositionFetch};

    fn reading(lat: f64, lon: f64) -> LocationReading {
        LocationReading::now(GeoPoint::new_unchecked(lat, lon))
    }

    fn coordinator_with(
        permission: PermissionStatus,
        fetches: Vec<PositionFetch>,
    ) -> SessionCoordinator {
        let mut port = MockDeviceLocationPort::new();
        port.expect_request_permission()
            .returning(move || permission);
        let mut queue = fetches.into_iter();
        port.expect_current_position().returning(move || {
            queue
                .next()
                .unwrap_or_else(|| PositionFetch::Failed("exhausted".to_string()))
        });
        SessionCoordinator::new(LocationAcquirer::new(Arc::new(port)))
    }

    fn idle_coordinator() -> SessionCoordinator {
        coordinator_with(PermissionStatus::Granted, vec![])
    }

    #[test]
    fn new_session_is_acquiring() {
        let coordinator = idle_coordinator();
        assert_eq!(coordinator.snapshot().phase, SessionPhase::Acquiring);
    }

    #[tokio::test]
    async fn initialize_success_sets_current_and_previous() {
        let fix = reading(38.5, -120.2);
        let coordinator =
            coordinator_with(PermissionStatus::Granted, vec![PositionFetch::Fetched(fix)]);

        let outcome = coordinator.initialize().await.unwrap();
        assert_eq!(outcome, LocationFix::Fresh(fix));

        let state = coordinator.snapshot();
        assert_eq!(state.phase, SessionPhase::Ready);
        assert_eq!(state.current, Some(fix));
        assert_eq!(state.previous, Some(fix));
        assert!(!state.current_is_stale);
    }

    #[tokio::test]
    async fn initialize_denied_sets_error_phase() {
        let coordinator = coordinator_with(PermissionStatus::Denied, vec![]);

        let err = coordinator.initialize().await.unwrap_err();
        assert!(matches!(err, ApplicationError::PermissionDenied));

        let state = coordinator.snapshot();
        assert_eq!(
            state.phase,
            SessionPhase::Error("Permission to access location was denied".to_string())
        );
        assert!(state.current.is_none());
    }

    #[tokio::test]
    async fn initialize_unavailable_sets_error_phase() {
        let coordinator = coordinator_with(
            PermissionStatus::Granted,
            vec![PositionFetch::Failed("no satellites".to_string())],
        );

        let err = coordinator.initialize().await.unwrap_err();
        assert!(matches!(err, ApplicationError::LocationUnavailable(_)));
        assert!(coordinator.snapshot().phase.error_message().is_some());
    }

    #[tokio::test]
    async fn second_failing_initialize_falls_back_to_previous() {
        let first = reading(40.7, -120.95);
        let coordinator = coordinator_with(
            PermissionStatus::Granted,
            vec![
                PositionFetch::Fetched(first),
                PositionFetch::Failed("timeout".to_string()),
            ],
        );

        coordinator.initialize().await.unwrap();
        let outcome = coordinator.initialize().await.unwrap();

        assert_eq!(outcome, LocationFix::Stale(first));
        let state = coordinator.snapshot();
        assert_eq!(state.phase, SessionPhase::Ready);
        assert_eq!(state.current, Some(first));
        assert_eq!(state.previous, Some(first));
        assert!(state.current_is_stale);
    }

    #[test]
    fn destination_change_keeps_existing_path() {
        let coordinator = idle_coordinator();
        let first = GeoPoint::new_unchecked(40.7, -120.95);
        let path = vec![
            GeoPoint::new_unchecked(38.5, -120.2),
            GeoPoint::new_unchecked(40.7, -120.95),
        ];

        coordinator.set_destination(first);
        coordinator.set_path(path.clone()).unwrap();
        coordinator.set_destination(GeoPoint::new_unchecked(1.0, 1.0));

        let state = coordinator.snapshot();
        assert_eq!(state.destination, Some(GeoPoint::new_unchecked(1.0, 1.0)));
        assert_eq!(state.path, path);
    }

    #[test]
    fn path_requires_destination() {
        let coordinator = idle_coordinator();
        let err = coordinator
            .set_path(vec![GeoPoint::new_unchecked(1.0, 1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::MissingEndpoint(RouteEndpoint::Destination)
        ));

        // Clearing is always allowed
        coordinator.set_path(Vec::new()).unwrap();
    }

    #[test]
    fn recenter_targets() {
        let coordinator = idle_coordinator();
        assert!(matches!(
            coordinator.recenter_target(RecenterTarget::Me),
            Err(ApplicationError::RecenterUnavailable(RecenterTarget::Me))
        ));
        assert!(matches!(
            coordinator.recenter_target(RecenterTarget::Search),
            Err(ApplicationError::RecenterUnavailable(RecenterTarget::Search))
        ));

        let point = GeoPoint::new_unchecked(43.252, -126.453);
        coordinator.set_destination(point);
        assert_eq!(
            coordinator.recenter_target(RecenterTarget::Search).unwrap(),
            point
        );
    }

    #[tokio::test]
    async fn recenter_on_me_after_initialize() {
        let fix = reading(38.5, -120.2);
        let coordinator =
            coordinator_with(PermissionStatus::Granted, vec![PositionFetch::Fetched(fix)]);
        coordinator.initialize().await.unwrap();

        assert_eq!(
            coordinator.recenter_target(RecenterTarget::Me).unwrap(),
            fix.coords
        );
    }

    #[test]
    fn superseded_search_result_is_dropped() {
        let coordinator = idle_coordinator();
        let older = coordinator.begin_search();
        let newer = coordinator.begin_search();

        let newer_point = GeoPoint::new_unchecked(2.0, 2.0);
        assert!(coordinator.apply_destination(newer, newer_point));
        // The older request completes last but must not win
        assert!(!coordinator.apply_destination(older, GeoPoint::new_unchecked(1.0, 1.0)));

        assert_eq!(coordinator.snapshot().destination, Some(newer_point));
    }

    #[test]
    fn superseded_route_is_dropped() {
        let coordinator = idle_coordinator();
        coordinator.set_destination(GeoPoint::new_unchecked(2.0, 2.0));

        let older = coordinator.begin_directions();
        let newer = coordinator.begin_directions();
        assert!(older < newer);

        let path = vec![GeoPoint::new_unchecked(2.0, 2.0)];
        assert!(!coordinator.apply_path(older, path.clone()).unwrap());
        assert!(coordinator.snapshot().path.is_empty());

        assert!(coordinator.apply_path(newer, path.clone()).unwrap());
        assert_eq!(coordinator.snapshot().path, path);
    }
}
