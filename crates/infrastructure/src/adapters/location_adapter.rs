//! Configured location adapter - Implements DeviceLocationPort from settings
//!
//! Stands in for a platform positioning service on hosts that have none.
//! The permission answer and the position come from configuration.

use application::ports::{DeviceLocationPort, PermissionStatus, PositionFetch};
use async_trait::async_trait;
use domain::{GeoPoint, LocationReading};
use tracing::{debug, instrument};

use crate::config::LocationAppConfig;

/// Location source backed by fixed settings
#[derive(Debug, Clone)]
pub struct ConfiguredLocationAdapter {
    permission: PermissionStatus,
    position: Result<Option<GeoPoint>, String>,
}

impl ConfiguredLocationAdapter {
    /// Create an adapter with an explicit permission and position
    #[must_use]
    pub const fn new(permission: PermissionStatus, position: Option<GeoPoint>) -> Self {
        Self {
            permission,
            position: Ok(position),
        }
    }

    /// Create an adapter from the `location` configuration section
    ///
    /// Invalid coordinates do not fail construction; every fetch reports them.
    #[must_use]
    pub fn from_config(config: &LocationAppConfig) -> Self {
        Self {
            permission: config.permission.into(),
            position: config.position().map_err(|e| e.to_string()),
        }
    }

    /// Replace the configured position
    #[must_use]
    pub fn with_position(mut self, position: GeoPoint) -> Self {
        self.position = Ok(Some(position));
        self
    }
}

#[async_trait]
impl DeviceLocationPort for ConfiguredLocationAdapter {
    async fn request_permission(&self) -> PermissionStatus {
        debug!(permission = ?self.permission, "Location permission answered");
        self.permission
    }

    #[instrument(skip(self))]
    async fn current_position(&self) -> PositionFetch {
        match &self.position {
            Ok(Some(point)) => PositionFetch::Fetched(LocationReading::now(*point)),
            Ok(None) => PositionFetch::Failed("No position configured".to_string()),
            Err(reason) => PositionFetch::Failed(reason.clone()),
        }
    }
}
