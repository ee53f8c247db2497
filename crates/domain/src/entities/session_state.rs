//! Navigation session state

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, LocationReading};

/// Lifecycle phase of a navigation session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Waiting for the location attempt to finish
    #[default]
    Acquiring,
    /// A position is available
    Ready,
    /// The location attempt ended in a terminal failure
    Error(String),
}

impl SessionPhase {
    /// Check whether the session has a usable position
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Error message, if the session failed
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything the presentation layer renders: positions, destination and route
///
/// Lives for one session only. `previous` is only ever replaced by a newer
/// successful reading; failures never clear it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Position shown as "you are here"
    pub current: Option<LocationReading>,
    /// Last successfully acquired reading, used as fallback
    pub previous: Option<LocationReading>,
    /// Whether `current` is a fallback rather than a fresh fix
    pub current_is_stale: bool,
    /// Resolved search destination
    pub destination: Option<GeoPoint>,
    /// Decoded route, in traversal order; empty when no route is shown
    pub path: Vec<GeoPoint>,
    /// Lifecycle phase
    pub phase: SessionPhase,
}

impl SessionState {
    /// Create a fresh session in the acquiring phase
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current device coordinates, if known
    #[must_use]
    pub fn current_coords(&self) -> Option<GeoPoint> {
        self.current.map(|reading| reading.coords)
    }
}
