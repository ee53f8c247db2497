//! Nominatim geocoding client
//!
//! Converts free-form place queries to geographic coordinates using
//! the [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Implements request spacing (max 1 request/second per Nominatim usage policy)
//! and result caching to minimize API calls.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::models::Place;

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Country code filter (e.g., "de" for Germany, empty for worldwide)
    #[serde(default)]
    pub country_filter: String,

    /// Preferred result language (`accept-language`)
    #[serde(default = "default_language")]
    pub language: String,

    /// Minimum spacing between two requests in milliseconds
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// User-Agent sent with every request (required by the usage policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_min_request_interval_ms() -> u64 {
    1100
}

fn default_user_agent() -> String {
    concat!("Wayfinder/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: String::new(),
            language: default_language(),
            min_request_interval_ms: default_min_request_interval_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_hours > 0
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Query was empty after trimming
    #[error("Geocoding query must not be empty")]
    EmptyQuery,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search places matching a free-form query, best match first
    ///
    /// An empty vector means the provider knows no such place.
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, GeocodingError>;
}

/// Nominatim-based geocoding client with request spacing and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, Vec<Place>>>,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_hours * 3600))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Mutex::new(None),
        })
    }

    /// Keep requests at least `min_request_interval_ms` apart
    async fn rate_limit(&self) {
        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }

    /// Parse the raw Nominatim JSON array into places
    fn parse_search_response(body: &str) -> Result<Vec<Place>, GeocodingError> {
        let raw: Vec<NominatimResult> =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        raw.into_iter().map(Self::convert_result).collect()
    }

    /// Nominatim sends coordinates as strings
    fn convert_result(raw: NominatimResult) -> Result<Place, GeocodingError> {
        let latitude: f64 = raw
            .lat
            .trim()
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid latitude '{}'", raw.lat)))?;
        let longitude: f64 = raw
            .lon
            .trim()
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid longitude '{}'", raw.lon)))?;

        Ok(Place {
            latitude,
            longitude,
            display_name: raw.display_name,
        })
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }

        let cache_key = format!("{limit}:{}", query.to_lowercase());
        if let Some(cache) = &self.cache {
            if let Some(places) = cache.get(&cache_key).await {
                debug!(%query, "Geocoding cache hit");
                return Ok(places);
            }
        }

        self.rate_limit().await;

        let url = self.search_url();
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", limit.to_string()),
            ("accept-language", self.config.language.clone()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%query, "Geocoding query");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let places = Self::parse_search_response(&body)?;
        debug!(%query, count = places.len(), "Geocoded query");

        if let Some(cache) = &self.cache {
            if !places.is_empty() {
                cache.insert(cache_key, places.clone()).await;
            }
        }

        Ok(places)
    }
}

/// Raw Nominatim API response entry
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}
