//! Routing integration for Wayfinder
//!
//! Provides driving directions via the [OpenRouteService](https://openrouteservice.org)
//! directions API and free-text place search via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern. [`DirectionsClient`] defines the
//! interface for route requests, implemented by [`OpenRouteServiceClient`].
//! [`GeocodingClient`] handles place-to-coordinate search via
//! [`NominatimGeocodingClient`]. Both return raw provider models; choosing the
//! best candidate is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_routing::{DirectionsClient, OpenRouteServiceClient, RoutingConfig};
//!
//! let config = RoutingConfig::default();
//! let client = OpenRouteServiceClient::new(&config)?;
//!
//! let response = client.directions(
//!     GeoPoint::new(49.41461, 8.681495)?, // Heidelberg origin
//!     GeoPoint::new(49.420318, 8.687872)?, // Heidelberg destination
//! ).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{DirectionsClient, OpenRouteServiceClient};
pub use config::RoutingConfig;
pub use error::RoutingError;
pub use geocoding::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
pub use models::{DirectionsResponse, Place, Route, RouteSummary};
