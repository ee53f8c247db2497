//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and provides
//! configuration loading, startup validation and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod validation;

pub use adapters::*;
pub use config::{AppConfig, Environment, LocationAppConfig, PermissionSetting};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
pub use validation::{ConfigValidator, ConfigWarning, WarningSeverity};
