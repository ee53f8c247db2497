//! Geocoding service port
//!
//! Resolves free-text place queries to coordinates. Adapters in the
//! infrastructure layer implement this port using a geocoding API.

use async_trait::async_trait;
use domain::GeoPoint;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for place search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search for places matching `query`, ranked best first, at most `limit`
    ///
    /// An empty vector means no match. Transport failures are reported as
    /// `ApplicationError::Transport`.
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeoPoint>, ApplicationError>;
}
