//! Logging setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! human-readable or a JSON formatting layer. Output goes to stderr so command
//! output on stdout stays machine-readable.

mod logging;

pub use logging::{TelemetryConfig, TelemetryError, init_telemetry, parse_filter};
