//! Device position acquisition with permission and fallback handling
//!
//! One acquisition walks `Unrequested -> PermissionPending -> Granted ->
//! Fetching -> Succeeded | Failed`, or stops at `Denied`. A failed fetch falls
//! back to the last good reading of the session when one exists; that reading
//! is handed back marked stale so the user can be told it is not current.

use std::sync::Arc;

use domain::LocationReading;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DeviceLocationPort, PermissionStatus, PositionFetch};

/// Where the acquirer is in its permission/fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionState {
    /// Nothing asked yet
    #[default]
    Unrequested,
    /// Waiting for the permission answer
    PermissionPending,
    /// Permission granted, fetch not started
    Granted,
    /// Waiting for the position
    Fetching,
    /// Last fetch produced a reading
    Succeeded,
    /// Last fetch failed
    Failed,
    /// Permission refused
    Denied,
}

/// Successful outcome of an acquisition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFix {
    /// Freshly fetched reading
    Fresh(LocationReading),
    /// Earlier reading reused because the fetch failed
    Stale(LocationReading),
}

impl LocationFix {
    /// The reading, fresh or not
    #[must_use]
    pub const fn reading(&self) -> &LocationReading {
        match self {
            Self::Fresh(reading) | Self::Stale(reading) => reading,
        }
    }

    /// Whether this is a fallback reading
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }
}

/// Obtains the device position through a [`DeviceLocationPort`]
pub struct LocationAcquirer {
    port: Arc<dyn DeviceLocationPort>,
    state: Mutex<AcquisitionState>,
}

impl std::fmt::Debug for LocationAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationAcquirer")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl LocationAcquirer {
    /// Create a new acquirer
    #[must_use]
    pub fn new(port: Arc<dyn DeviceLocationPort>) -> Self {
        Self {
            port,
            state: Mutex::new(AcquisitionState::Unrequested),
        }
    }

    /// Current state of the permission/fetch cycle
    #[must_use]
    pub fn state(&self) -> AcquisitionState {
        *self.state.lock()
    }

    fn transition(&self, next: AcquisitionState) {
        let mut state = self.state.lock();
        debug!(from = ?*state, to = ?next, "Location acquisition state");
        *state = next;
    }

    /// Acquire the device position once
    ///
    /// `previous` is the last successful reading of this session, used only
    /// when permission is granted but the fetch fails.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` when permission is refused (no fallback), and
    /// `LocationUnavailable` when the fetch fails with no previous reading.
    #[instrument(skip(self))]
    pub async fn acquire(
        &self,
        previous: Option<LocationReading>,
    ) -> Result<LocationFix, ApplicationError> {
        self.transition(AcquisitionState::PermissionPending);

        match self.port.request_permission().await {
            PermissionStatus::Granted => self.transition(AcquisitionState::Granted),
            PermissionStatus::Denied => {
                self.transition(AcquisitionState::Denied);
                warn!("Location permission denied");
                return Err(ApplicationError::PermissionDenied);
            },
        }

        self.transition(AcquisitionState::Fetching);

        match self.port.current_position().await {
            PositionFetch::Fetched(reading) => {
                self.transition(AcquisitionState::Succeeded);
                info!(coords = %reading.coords, "Location acquired");
                Ok(LocationFix::Fresh(reading))
            },
            PositionFetch::Failed(reason) => {
                self.transition(AcquisitionState::Failed);
                match previous {
                    Some(reading) => {
                        warn!(
                            %reason,
                            coords = %reading.coords,
                            "Location fetch failed, using previous location"
                        );
                        Ok(LocationFix::Stale(reading))
                    },
                    None => {
                        warn!(%reason, "Location fetch failed and no previous location exists");
                        Err(ApplicationError::LocationUnavailable(reason))
                    },
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::GeoPoint;

    use super::*;
    use crate::ports::MockDeviceLocationPort;

    fn reading(lat: f64, lon: f64) -> LocationReading {
        LocationReading::now(GeoPoint::new_unchecked(lat, lon))
    }

    fn port(permission: PermissionStatus, fetch: Option<PositionFetch>) -> MockDeviceLocationPort {
        let mut port = MockDeviceLocationPort::new();
        port.expect_request_permission()
            .times(1)
            .returning(move || permission);
        match fetch {
            Some(fetch) => {
                port.expect_current_position()
                    .times(1)
                    .returning(move || fetch.clone());
            },
            None => {
                port.expect_current_position().never();
            },
        }
        port
    }

    #[test]
    fn starts_unrequested() {
        let acquirer = LocationAcquirer::new(Arc::new(MockDeviceLocationPort::new()));
        assert_eq!(acquirer.state(), AcquisitionState::Unrequested);
    }

    #[tokio::test]
    async fn fresh_reading_on_success() {
        let fix = reading(38.5, -120.2);
        let acquirer = LocationAcquirer::new(Arc::new(port(
            PermissionStatus::Granted,
            Some(PositionFetch::Fetched(fix)),
        )));

        let result = acquirer.acquire(None).await.unwrap();
        assert_eq!(result, LocationFix::Fresh(fix));
        assert!(!result.is_stale());
        assert_eq!(acquirer.state(), AcquisitionState::Succeeded);
    }

    #[tokio::test]
    async fn denied_permission_skips_fetch_and_ignores_previous() {
        let acquirer = LocationAcquirer::new(Arc::new(port(PermissionStatus::Denied, None)));

        let err = acquirer
            .acquire(Some(reading(1.0, 2.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::PermissionDenied));
        assert_eq!(acquirer.state(), AcquisitionState::Denied);
    }

    #[tokio::test]
    async fn failed_fetch_without_previous_is_unavailable() {
        let acquirer = LocationAcquirer::new(Arc::new(port(
            PermissionStatus::Granted,
            Some(PositionFetch::Failed("no fix".to_string())),
        )));

        let err = acquirer.acquire(None).await.unwrap_err();
        assert!(matches!(err, ApplicationError::LocationUnavailable(reason) if reason == "no fix"));
        assert_eq!(acquirer.state(), AcquisitionState::Failed);
    }

    #[tokio::test]
    async fn failed_fetch_falls_back_to_previous_as_stale() {
        let previous = reading(40.7, -120.95);
        let acquirer = LocationAcquirer::new(Arc::new(port(
            PermissionStatus::Granted,
            Some(PositionFetch::Failed("timeout".to_string())),
        )));

        let result = acquirer.acquire(Some(previous)).await.unwrap();
        assert_eq!(result, LocationFix::Stale(previous));
        assert!(result.is_stale());
        assert_eq!(result.reading(), &previous);
    }
}
