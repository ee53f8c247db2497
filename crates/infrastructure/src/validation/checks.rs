//! Startup validation for application configuration
//!
//! Critical findings block startup. Production escalates findings that would
//! only degrade a development session.

use std::fmt;

use crate::config::{AppConfig, Environment, PermissionSetting};

/// Public Nominatim instance; its usage policy allows one request per second
const PUBLIC_NOMINATIM_HOST: &str = "nominatim.openstreetmap.org";

/// Severity level for configuration warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    /// Informational - no action required
    Info,
    /// Warning - some commands will not work
    Warning,
    /// Critical - startup is refused
    Critical,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A configuration finding with severity and description
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// Severity level of the finding
    pub severity: WarningSeverity,
    /// Short code identifying the finding
    pub code: &'static str,
    /// Human-readable description of the issue
    pub message: String,
    /// Recommended action to resolve the issue
    pub recommendation: String,
}

impl ConfigWarning {
    /// Create a new finding
    #[must_use]
    pub fn new(
        severity: WarningSeverity,
        code: &'static str,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Check if this finding is critical
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity, WarningSeverity::Critical)
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.code, self.message, self.recommendation
        )
    }
}

/// Validates application configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration and return all findings, critical first
    #[must_use]
    pub fn validate(config: &AppConfig) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let is_production = config.environment() == Environment::Production;

        Self::check_routing(config, is_production, &mut warnings);
        Self::check_geocoding(config, &mut warnings);
        Self::check_location(config, &mut warnings);

        warnings.sort_by(|a, b| b.severity.cmp(&a.severity));
        warnings
    }

    /// Whether startup should be refused
    #[must_use]
    pub fn should_block_startup(warnings: &[ConfigWarning]) -> bool {
        warnings.iter().any(ConfigWarning::is_critical)
    }

    /// Log all findings using tracing
    pub fn log_warnings(warnings: &[ConfigWarning]) {
        for warning in warnings {
            match warning.severity {
                WarningSeverity::Critical => {
                    tracing::error!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration error"
                    );
                },
                WarningSeverity::Warning => {
                    tracing::warn!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration warning"
                    );
                },
                WarningSeverity::Info => {
                    tracing::info!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Configuration notice"
                    );
                },
            }
        }
    }

    fn check_routing(config: &AppConfig, is_production: bool, warnings: &mut Vec<ConfigWarning>) {
        if !config.routing.has_api_key() {
            let severity = if is_production {
                WarningSeverity::Critical
            } else {
                WarningSeverity::Warning
            };

            warnings.push(ConfigWarning::new(
                severity,
                "CFG001",
                "No OpenRouteService API key configured; directions are unavailable",
                "Set WAYFINDER_ROUTING__API_KEY or routing.api_key",
            ));
            return;
        }

        if let Err(reason) = config.routing.validate() {
            warnings.push(ConfigWarning::new(
                WarningSeverity::Critical,
                "CFG002",
                format!("Invalid routing configuration: {reason}"),
                "Fix the [routing] section",
            ));
        }
    }

    fn check_geocoding(config: &AppConfig, warnings: &mut Vec<ConfigWarning>) {
        let geocoding = &config.geocoding;

        match url::Url::parse(&geocoding.base_url) {
            Ok(url) => {
                if url.host_str() == Some(PUBLIC_NOMINATIM_HOST)
                    && geocoding.min_request_interval_ms < 1000
                {
                    warnings.push(ConfigWarning::new(
                        WarningSeverity::Warning,
                        "CFG004",
                        format!(
                            "Request interval of {} ms exceeds the public Nominatim rate limit",
                            geocoding.min_request_interval_ms
                        ),
                        "Use at least 1000 ms against nominatim.openstreetmap.org",
                    ));
                }
            },
            Err(e) => {
                warnings.push(ConfigWarning::new(
                    WarningSeverity::Critical,
                    "CFG003",
                    format!("geocoding.base_url is not a URL: {e}"),
                    "Fix the [geocoding] section",
                ));
            },
        }

        if geocoding.timeout_secs == 0 {
            warnings.push(ConfigWarning::new(
                WarningSeverity::Critical,
                "CFG003",
                "geocoding.timeout_secs must be greater than zero",
                "Fix the [geocoding] section",
            ));
        }

        if !geocoding.caching_enabled() {
            warnings.push(ConfigWarning::new(
                WarningSeverity::Info,
                "CFG005",
                "Geocoding cache is disabled",
                "Set geocoding.cache_ttl_hours to reuse search results",
            ));
        }
    }

    fn check_location(config: &AppConfig, warnings: &mut Vec<ConfigWarning>) {
        let location = &config.location;

        if location.permission == PermissionSetting::Denied {
            warnings.push(ConfigWarning::new(
                WarningSeverity::Info,
                "CFG006",
                "Location permission is configured as denied",
                "Set location.permission = \"granted\" to allow locating",
            ));
        }

        if location.is_partial() {
            warnings.push(ConfigWarning::new(
                WarningSeverity::Warning,
                "CFG007",
                "Only one of location.latitude and location.longitude is set",
                "Set both coordinates or neither",
            ));
        }

        if let Err(e) = location.position() {
            warnings.push(ConfigWarning::new(
                WarningSeverity::Critical,
                "CFG008",
                format!("Configured location is invalid: {e}"),
                "Use latitude in [-90, 90] and longitude in [-180, 180]",
            ));
        }
    }
}
