//! Device location settings for hosts without a positioning service

use application::ports::PermissionStatus;
use domain::{DomainError, GeoPoint};
use serde::{Deserialize, Serialize};

/// Permission answer the configured location source gives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionSetting {
    /// Location access allowed
    #[default]
    Granted,
    /// Location access refused
    Denied,
}

impl From<PermissionSetting> for PermissionStatus {
    fn from(setting: PermissionSetting) -> Self {
        match setting {
            PermissionSetting::Granted => Self::Granted,
            PermissionSetting::Denied => Self::Denied,
        }
    }
}

/// Location source configuration
///
/// Without both coordinates every position fetch fails, which exercises the
/// "no location" path of the session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LocationAppConfig {
    /// Permission answer (default: granted)
    #[serde(default)]
    pub permission: PermissionSetting,

    /// Fixed latitude reported by position fetches
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Fixed longitude reported by position fetches
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocationAppConfig {
    /// The configured position
    ///
    /// `Ok(None)` when either coordinate is missing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` when both are set but out of range.
    pub fn position(&self) -> Result<Option<GeoPoint>, DomainError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude).map(Some),
            _ => Ok(None),
        }
    }

    /// Whether exactly one of the coordinates is set
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.latitude.is_some() != self.longitude.is_some()
    }
}
