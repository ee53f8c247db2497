//! OpenRouteService directions client
//!
//! Requests routes from the
//! [OpenRouteService directions API](https://openrouteservice.org/dev/#/api-docs/v2/directions)
//! for a single origin/destination pair.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoPoint;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::DirectionsResponse;

/// Provider error codes meaning "these points cannot be connected"
const ROUTE_NOT_FOUND_CODES: [u32; 2] = [2009, 2010];

/// Trait for directions service clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Request routes from `origin` to `destination`, best candidate first
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResponse, RoutingError>;
}

/// Directions client for the OpenRouteService v2 API
#[derive(Debug)]
pub struct OpenRouteServiceClient {
    client: Client,
    config: RoutingConfig,
}

impl OpenRouteServiceClient {
    /// Create a new OpenRouteService client
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        if !config.has_api_key() {
            return Err(RoutingError::ConfigurationError(
                "OpenRouteService API key is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("Wayfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Endpoint for the configured profile
    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }

    /// Build the request body; the API expects `[lon, lat]` pairs
    fn request_body(origin: GeoPoint, destination: GeoPoint) -> DirectionsRequest {
        DirectionsRequest {
            coordinates: vec![origin.lon_lat(), destination.lon_lat()],
        }
    }

    /// Parse the raw JSON directions response
    fn parse_directions_response(body: &str) -> Result<DirectionsResponse, RoutingError> {
        serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))
    }

    /// Extract the provider error code from an error body, if present
    fn error_code(body: &str) -> Option<u32> {
        serde_json::from_str::<RawErrorResponse>(body)
            .ok()
            .and_then(|raw| raw.error.code)
    }
}

#[async_trait]
impl DirectionsClient for OpenRouteServiceClient {
    #[instrument(
        skip_all,
        fields(from = %origin, to = %destination, profile = %self.config.profile)
    )]
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResponse, RoutingError> {
        let url = self.directions_url();
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| RoutingError::ConfigurationError("API key missing".to_string()))?;

        debug!(?url, "Requesting directions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&Self::request_body(origin, destination))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    RoutingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RoutingError::Unauthorized(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        if !status.is_success() {
            if Self::error_code(&body).is_some_and(|code| ROUTE_NOT_FOUND_CODES.contains(&code)) {
                warn!("Provider could not connect the route endpoints");
                return Err(RoutingError::NoRouteFound {
                    from: origin.to_string(),
                    to: destination.to_string(),
                });
            }
            return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
        }

        let result = Self::parse_directions_response(&body)?;

        if result.routes.is_empty() {
            warn!("No routes returned");
        }

        debug!(count = result.routes.len(), "Routes found");
        Ok(result)
    }
}

// --- Raw API request/response types ---

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct RawErrorResponse {
    error: RawError,
}

#[derive(Debug, Deserialize)]
struct RawError {
    code: Option<u32>,
}
