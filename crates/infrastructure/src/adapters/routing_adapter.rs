//! Routing adapter - Implements RoutingPort using integration_routing

use application::error::ApplicationError;
use application::ports::{RouteCandidate, RouteRequest, RoutingPort};
use async_trait::async_trait;
use domain::EncodedGeometry;
use integration_routing::{
    DirectionsClient, DirectionsResponse, OpenRouteServiceClient, RoutingConfig, RoutingError,
};
use tracing::{debug, instrument, warn};

/// Operation name carried by transport errors from this adapter
const OPERATION: &str = "route";

/// Adapter for directions using OpenRouteService
///
/// Without an API key the adapter is still constructed, so commands that
/// never route keep working; every directions request then fails with a
/// configuration error.
pub struct OpenRouteServiceAdapter {
    client: Option<Box<dyn DirectionsClient>>,
}

impl std::fmt::Debug for OpenRouteServiceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteServiceAdapter")
            .field("configured", &self.client.is_some())
            .finish()
    }
}

impl OpenRouteServiceAdapter {
    /// Wrap an existing directions client
    #[must_use]
    pub fn new(client: impl DirectionsClient + 'static) -> Self {
        Self {
            client: Some(Box::new(client)),
        }
    }

    /// Adapter that rejects every request
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self { client: None }
    }

    /// Build the OpenRouteService client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, ApplicationError> {
        if !config.has_api_key() {
            warn!("No routing API key configured, directions are disabled");
            return Ok(Self::unconfigured());
        }

        let client = OpenRouteServiceClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Whether a directions client is available
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Map a provider failure; "no route" becomes an empty candidate list
    fn map_result(
        result: Result<DirectionsResponse, RoutingError>,
    ) -> Result<Vec<RouteCandidate>, ApplicationError> {
        match result {
            Ok(response) => Ok(Self::to_candidates(response)),
            Err(RoutingError::NoRouteFound { from, to }) => {
                debug!(%from, %to, "Provider found no route");
                Ok(Vec::new())
            },
            Err(RoutingError::ConfigurationError(reason)) => {
                Err(ApplicationError::Configuration(reason))
            },
            Err(other) => Err(ApplicationError::transport(OPERATION, other.to_string())),
        }
    }

    fn to_candidates(response: DirectionsResponse) -> Vec<RouteCandidate> {
        response
            .routes
            .into_iter()
            .map(|route| RouteCandidate {
                geometry: EncodedGeometry::new(route.geometry),
                distance_meters: route.summary.distance,
                duration_seconds: route.summary.duration,
            })
            .collect()
    }
}

#[async_trait]
impl RoutingPort for OpenRouteServiceAdapter {
    #[instrument(skip(self))]
    async fn directions(
        &self,
        request: &RouteRequest,
    ) -> Result<Vec<RouteCandidate>, ApplicationError> {
        let client = self.client.as_ref().ok_or_else(|| {
            ApplicationError::Configuration(
                "Directions require an OpenRouteService API key".to_string(),
            )
        })?;

        let result = client
            .directions(request.origin, request.destination)
            .await;
        Self::map_result(result)
    }
}

#[cfg(test)]
mod tests {
    use domain::GeoPoint;
    use integration_routing::{Route, RouteSummary};

    use super::*;

    fn request() -> RouteRequest {
        RouteRequest::new(
            GeoPoint::new_unchecked(38.5, -120.2),
            GeoPoint::new_unchecked(43.252, -126.453),
        )
    }

    #[test]
    fn converts_routes_in_order() {
        let response = DirectionsResponse {
            routes: vec![
                Route {
                    geometry: "_p~iF~ps|U".to_string(),
                    summary: RouteSummary {
                        distance: 1200.0,
                        duration: 90.0,
                    },
                },
                Route {
                    geometry: "??".to_string(),
                    summary: RouteSummary::default(),
                },
            ],
        };

        let candidates = OpenRouteServiceAdapter::map_result(Ok(response)).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].geometry.as_str(), "_p~iF~ps|U");
        assert!((candidates[0].distance_meters - 1200.0).abs() < f64::EPSILON);
        assert!((candidates[0].duration_seconds - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_route_is_empty_list() {
        let result = OpenRouteServiceAdapter::map_result(Err(RoutingError::NoRouteFound {
            from: "a".to_string(),
            to: "b".to_string(),
        }));
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn transport_failures_name_the_operation() {
        let err = OpenRouteServiceAdapter::map_result(Err(RoutingError::Timeout {
            timeout_secs: 10,
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Transport {
                operation: "route",
                ..
            }
        ));

        let err = OpenRouteServiceAdapter::map_result(Err(RoutingError::RateLimitExceeded {
            retry_after_secs: Some(30),
        }))
        .unwrap_err();
        assert!(err.to_string().starts_with("route failed"));
    }

    #[tokio::test]
    async fn unconfigured_adapter_rejects_requests() {
        let adapter = OpenRouteServiceAdapter::from_config(&RoutingConfig::default()).unwrap();
        assert!(!adapter.is_configured());

        let err = adapter.directions(&request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn configured_adapter_from_config() {
        let adapter = OpenRouteServiceAdapter::from_config(&RoutingConfig::for_testing()).unwrap();
        assert!(adapter.is_configured());
    }
}
