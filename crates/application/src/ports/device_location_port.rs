//! Device location port
//!
//! Abstracts the platform's location capability: a permission prompt and a
//! one-shot position fetch. Both report explicit outcomes instead of errors
//! so callers branch with `match`.

use async_trait::async_trait;
use domain::LocationReading;
#[cfg(test)]
use mockall::automock;

/// Answer to a foreground location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Location may be read
    Granted,
    /// The user or platform refused
    Denied,
}

/// Result of a single position fetch
#[derive(Debug, Clone, PartialEq)]
pub enum PositionFetch {
    /// A fix was obtained
    Fetched(LocationReading),
    /// No fix; carries the platform's reason
    Failed(String),
}

/// Port for reading the device position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeviceLocationPort: Send + Sync {
    /// Ask for foreground location permission
    async fn request_permission(&self) -> PermissionStatus;

    /// Fetch the current position once
    async fn current_position(&self) -> PositionFetch;
}
