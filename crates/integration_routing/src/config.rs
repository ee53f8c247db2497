//! Routing service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the OpenRouteService directions API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL for the OpenRouteService API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Routing profile (e.g. "driving-car", "cycling-regular")
    #[serde(default = "default_profile")]
    pub profile: String,

    /// API key sent as bearer credential
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

fn default_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_profile() -> String {
    "driving-car".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            profile: default_profile(),
            api_key: None,
        }
    }
}

impl RoutingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            api_key: Some(SecretString::from("test-key")),
            ..Default::default()
        }
    }

    /// Check if an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        url::Url::parse(&self.base_url).map_err(|e| format!("base_url is not a URL: {e}"))?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.profile.trim().is_empty() {
            return Err("profile must not be empty".to_string());
        }

        if !self.has_api_key() {
            return Err("api_key must be set".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoutingConfig::default();
        assert_eq!(config.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.profile, "driving-car");
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_testing_config() {
        let config = RoutingConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert!(config.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_key() {
        let config = RoutingConfig::default();
        assert!(config.validate().is_err());

        let config = RoutingConfig {
            api_key: Some(SecretString::from("  ")),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = RoutingConfig {
            base_url: "not a url".to_string(),
            ..RoutingConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = RoutingConfig {
            timeout_secs: 0,
            ..RoutingConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = RoutingConfig::for_testing();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("test-key"));

        let deserialized: RoutingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.profile, config.profile);
        assert!(deserialized.api_key.is_none());
    }
}
