//! Application configuration
//!
//! Sections:
//! - `geocoding`: Nominatim search settings
//! - `routing`: OpenRouteService directions settings
//! - `location`: configured location source
//! - `telemetry`: log filter and format

mod location;

use std::fmt;
use std::path::Path;

use integration_routing::{NominatimConfig, RoutingConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use location::{LocationAppConfig, PermissionSetting};

use crate::telemetry::TelemetryConfig;
use crate::validation::{ConfigValidator, ConfigWarning};

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "WAYFINDER";

/// Application environment (development or production)
///
/// Controls validation strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed validation
    #[default]
    Development,
    /// Production environment - strict validation
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Place search configuration
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// Directions configuration
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Location source configuration
    #[serde(default)]
    pub location: LocationAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from defaults, a file and the environment
    ///
    /// With `path` set, that file must exist. Without it, `config.toml` in the
    /// working directory is read when present. Environment variables such as
    /// `WAYFINDER_ROUTING__API_KEY` override both.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("routing.profile", "driving-car")?
            .set_default("location.permission", "granted")?
            .add_source(file)
            // Override with environment variables (e.g., WAYFINDER_ROUTING__PROFILE)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(environment = %config.environment(), "Configuration loaded");
        Ok(config)
    }

    /// Effective environment
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Check the configuration and return all findings, most severe first
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigWarning> {
        ConfigValidator::validate(self)
    }
}
