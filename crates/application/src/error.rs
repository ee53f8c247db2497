//! Application-level errors

use domain::{DomainError, RecenterTarget};
use thiserror::Error;

/// Which end of a route is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEndpoint {
    /// The current position
    Origin,
    /// The searched destination
    Destination,
}

impl std::fmt::Display for RouteEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (includes malformed route geometry)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Location permission was refused
    #[error("Location permission denied")]
    PermissionDenied,

    /// Position could not be fetched and no earlier reading exists
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// Search text was empty or whitespace
    #[error("Search query must not be empty")]
    EmptyQuery,

    /// Geocoder had no match for the query
    #[error("No location found for '{query}'")]
    GeocodeNotFound {
        /// The trimmed query
        query: String,
    },

    /// Provider returned no route between the endpoints
    #[error("No route found between the selected locations")]
    RouteNotFound,

    /// A route was requested without both endpoints
    #[error("Missing route {0}")]
    MissingEndpoint(RouteEndpoint),

    /// Camera target requested before the position is known
    #[error("No position to recenter on for '{0}'")]
    RecenterUnavailable(RecenterTarget),

    /// Network, HTTP or timeout failure of an outbound call
    #[error("{operation} failed: {message}")]
    Transport {
        /// Name of the failed operation (e.g. "geocode", "route")
        operation: &'static str,
        /// Underlying failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a transport error for the named operation
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    /// Message suitable for showing to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => "Permission to access location was denied".to_string(),
            Self::LocationUnavailable(_) => {
                "Unable to fetch location and no previous location found".to_string()
            },
            Self::EmptyQuery => "Search query cannot be empty".to_string(),
            Self::GeocodeNotFound { .. } => {
                "No location found. Please try a different search.".to_string()
            },
            Self::RouteNotFound => "No directions found for the specified locations.".to_string(),
            Self::MissingEndpoint(_) => {
                "Both current location and destination must be set to get directions.".to_string()
            },
            Self::RecenterUnavailable(RecenterTarget::Me) => {
                "Current location is not available.".to_string()
            },
            Self::RecenterUnavailable(RecenterTarget::Search) => {
                "No searched location to show yet.".to_string()
            },
            Self::Transport {
                operation: "geocode",
                ..
            } => "Failed to fetch location. Check your internet connection and try again."
                .to_string(),
            Self::Transport {
                operation: "route",
                ..
            } => "Failed to fetch directions. Please check your internet connection and try again."
                .to_string(),
            Self::Domain(DomainError::MalformedGeometry { index, fault }) => {
                format!("The route geometry could not be read ({fault} at byte {index}).")
            },
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::GeometryFault;

    use super::*;

    #[test]
    fn transport_error_names_operation() {
        let err = ApplicationError::transport("route", "HTTP 500");
        assert_eq!(err.to_string(), "route failed: HTTP 500");
    }

    #[test]
    fn malformed_geometry_passes_through() {
        let err: ApplicationError = DomainError::malformed(12, GeometryFault::Truncated).into();
        assert!(err.to_string().contains("index 12"));
        assert_eq!(
            err.user_message(),
            "The route geometry could not be read (input ends mid-value at byte 12)."
        );
    }

    #[test]
    fn user_messages_for_location_failures() {
        assert_eq!(
            ApplicationError::PermissionDenied.user_message(),
            "Permission to access location was denied"
        );
        assert_eq!(
            ApplicationError::LocationUnavailable("gps off".to_string()).user_message(),
            "Unable to fetch location and no previous location found"
        );
    }

    #[test]
    fn user_messages_for_transport_depend_on_operation() {
        assert!(
            ApplicationError::transport("geocode", "timeout")
                .user_message()
                .starts_with("Failed to fetch location")
        );
        assert!(
            ApplicationError::transport("route", "timeout")
                .user_message()
                .starts_with("Failed to fetch directions")
        );
        assert_eq!(
            ApplicationError::transport("other", "boom").user_message(),
            "other failed: boom"
        );
    }

    #[test]
    fn missing_endpoint_display() {
        let err = ApplicationError::MissingEndpoint(RouteEndpoint::Destination);
        assert_eq!(err.to_string(), "Missing route destination");
    }
}
