//! Configuration validation module
//!
//! Startup checks that report unusable or risky settings before any request
//! is made.

pub mod checks;

pub use checks::{ConfigValidator, ConfigWarning, WarningSeverity};
