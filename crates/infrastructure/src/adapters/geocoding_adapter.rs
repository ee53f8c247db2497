//! Geocoding adapter - Implements GeocodingPort using integration_routing

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::GeoPoint;
use integration_routing::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient, Place,
};
use tracing::{debug, instrument, warn};

/// Operation name carried by transport errors from this adapter
const OPERATION: &str = "geocode";

/// Adapter for place search using Nominatim
pub struct NominatimGeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for NominatimGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl NominatimGeocodingAdapter {
    /// Wrap an existing geocoding client
    #[must_use]
    pub fn new(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Build the Nominatim client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(client))
    }

    fn map_error(error: GeocodingError) -> ApplicationError {
        match error {
            GeocodingError::EmptyQuery => ApplicationError::EmptyQuery,
            other => ApplicationError::transport(OPERATION, other.to_string()),
        }
    }

    /// Convert a place, dropping results with impossible coordinates
    fn to_point(place: &Place) -> Option<GeoPoint> {
        match GeoPoint::new(place.latitude, place.longitude) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!(name = ?place.display_name, error = %e, "Ignoring geocoding result");
                None
            },
        }
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<GeoPoint>, ApplicationError> {
        let places = self
            .client
            .search(query, limit)
            .await
            .map_err(Self::map_error)?;

        debug!(count = places.len(), "Geocoding results");
        Ok(places.iter().filter_map(Self::to_point).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClient(Vec<Place>);

    #[async_trait]
    impl GeocodingClient for FixedClient {
        async fn search(&self, _query: &str, _limit: u8) -> Result<Vec<Place>, GeocodingError> {
            Ok(self.0.clone())
        }
    }

    struct FailingClient {
        empty_query: bool,
    }

    #[async_trait]
    impl GeocodingClient for FailingClient {
        async fn search(&self, _query: &str, _limit: u8) -> Result<Vec<Place>, GeocodingError> {
            if self.empty_query {
                Err(GeocodingError::EmptyQuery)
            } else {
                Err(GeocodingError::RequestFailed("HTTP 503".to_string()))
            }
        }
    }

    fn place(latitude: f64, longitude: f64) -> Place {
        Place {
            latitude,
            longitude,
            display_name: None,
        }
    }

    #[tokio::test]
    async fn converts_places_in_order() {
        let adapter = NominatimGeocodingAdapter::new(FixedClient(vec![
            place(49.4122, 8.7101),
            place(52.52, 13.405),
        ]));

        let points = adapter.search("Heidelberg", 2).await.unwrap();
        assert_eq!(
            points,
            vec![
                GeoPoint::new_unchecked(49.4122, 8.7101),
                GeoPoint::new_unchecked(52.52, 13.405),
            ]
        );
    }

    #[tokio::test]
    async fn drops_out_of_range_places() {
        let adapter = NominatimGeocodingAdapter::new(FixedClient(vec![
            place(123.0, 8.0),
            place(49.4122, 8.7101),
        ]));

        let points = adapter.search("Heidelberg", 2).await.unwrap();
        assert_eq!(points, vec![GeoPoint::new_unchecked(49.4122, 8.7101)]);
    }

    #[tokio::test]
    async fn maps_transport_errors() {
        let adapter = NominatimGeocodingAdapter::new(FailingClient { empty_query: false });

        let err = adapter.search("Berlin", 1).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Transport {
                operation: "geocode",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn maps_empty_query() {
        let adapter = NominatimGeocodingAdapter::new(FailingClient { empty_query: true });

        let err = adapter.search(" ", 1).await.unwrap_err();
        assert!(matches!(err, ApplicationError::EmptyQuery));
    }
}
