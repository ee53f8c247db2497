//! Free-text place resolution

use std::sync::Arc;

use domain::GeoPoint;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::GeocodingPort;

/// Only the provider's top-ranked match is ever used
const RESULT_LIMIT: u8 = 1;

/// Resolves search text to a single best-match coordinate
pub struct Geocoder {
    port: Arc<dyn GeocodingPort>,
}

impl std::fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geocoder").finish_non_exhaustive()
    }
}

impl Geocoder {
    /// Create a new geocoder
    #[must_use]
    pub fn new(port: Arc<dyn GeocodingPort>) -> Self {
        Self { port }
    }

    /// Resolve `query` to the highest-ranked match
    ///
    /// # Errors
    ///
    /// `EmptyQuery` for blank input (no request is made), `GeocodeNotFound`
    /// when the provider has no match, `Transport` for network failures.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> Result<GeoPoint, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApplicationError::EmptyQuery);
        }

        let matches = self.port.search(query, RESULT_LIMIT).await?;

        let best = matches
            .into_iter()
            .next()
            .ok_or_else(|| ApplicationError::GeocodeNotFound {
                query: query.to_string(),
            })?;

        debug!(%query, point = %best, "Resolved search");
        Ok(best)
    }
}
