//! Wayfinder CLI
//!
//! Command-line front end for locating, place search and driving directions.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{
    ApplicationError, Geocoder, LocationAcquirer, NavigationService, RoutePlanner,
    SessionCoordinator,
};
use clap::{Parser, Subcommand};
use domain::{EncodedGeometry, GeoPoint, RecenterTarget, polyline};
use infrastructure::{
    AppConfig, ConfigValidator, ConfiguredLocationAdapter, NominatimGeocodingAdapter,
    OpenRouteServiceAdapter, TelemetryConfig, init_telemetry,
};
use serde::Serialize;

use crate::output::Report;

/// Wayfinder CLI
#[derive(Parser)]
#[command(name = "wayfinder-cli")]
#[command(author, version, about = "Location and routing from the command line", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml when present)
    #[arg(short, long, env = "WAYFINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire and print the current position
    Locate {
        /// Position to report instead of the configured one ("lat,lon")
        #[arg(long, allow_hyphen_values = true)]
        at: Option<GeoPoint>,
    },

    /// Resolve a place name to coordinates
    Search {
        /// Free-text place query
        query: String,
    },

    /// Route from the current position to a searched place
    ///
    /// Example: wayfinder-cli directions "Heidelberg Hauptbahnhof" --at 49.41,8.69
    Directions {
        /// Free-text destination query
        query: String,

        /// Start position instead of the configured one ("lat,lon")
        #[arg(long, allow_hyphen_values = true)]
        at: Option<GeoPoint>,
    },

    /// Print the camera target for "me" or "search"
    Recenter {
        /// Which position to center on
        target: RecenterTarget,

        /// Place to search first (needed for "search")
        #[arg(short, long)]
        query: Option<String>,

        /// Position to report instead of the configured one ("lat,lon")
        #[arg(long, allow_hyphen_values = true)]
        at: Option<GeoPoint>,
    },

    /// Decode an encoded polyline into points
    Decode {
        /// Encoded polyline (precision 1e5)
        encoded: String,
    },

    /// Encode points into a polyline
    ///
    /// Example: wayfinder-cli encode 38.5,-120.2 40.7,-120.95
    Encode {
        /// Points as "lat,lon"
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<GeoPoint>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Print the user-facing message for `err` and exit with status 1
fn fail(err: &ApplicationError) -> ! {
    eprintln!("❌ {}", err.user_message());
    tracing::debug!(error = %err, "Command failed");
    std::process::exit(1)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load and check configuration, refusing to start on critical findings
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load(path).context("Failed to load configuration")?;

    let warnings = config.validate();
    ConfigValidator::log_warnings(&warnings);
    if ConfigValidator::should_block_startup(&warnings) {
        for warning in warnings.iter().filter(|w| w.is_critical()) {
            eprintln!("{warning}");
        }
        anyhow::bail!("Configuration has critical errors");
    }

    Ok(config)
}

/// Wire adapters and services for one session
fn build_service(config: &AppConfig, at: Option<GeoPoint>) -> anyhow::Result<NavigationService> {
    let mut location = ConfiguredLocationAdapter::from_config(&config.location);
    if let Some(point) = at {
        location = location.with_position(point);
    }

    let geocoding = NominatimGeocodingAdapter::from_config(&config.geocoding)
        .context("Failed to initialize geocoding")?;
    let routing = OpenRouteServiceAdapter::from_config(&config.routing)
        .context("Failed to initialize routing")?;

    let coordinator = SessionCoordinator::new(LocationAcquirer::new(Arc::new(location)));

    Ok(NavigationService::new(
        Arc::new(coordinator),
        Geocoder::new(Arc::new(geocoding)),
        RoutePlanner::new(Arc::new(routing)),
    ))
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Decode { .. } | Commands::Encode { .. } => None,
        _ => Some(load_config(cli.config.as_deref())?),
    };

    // Set up logging based on verbosity, falling back to the configured filter
    let mut telemetry = config
        .as_ref()
        .map_or_else(TelemetryConfig::default, |c| c.telemetry.clone());
    if cli.verbose > 0 || config.is_none() {
        telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_telemetry(&telemetry)?;

    let config = config.unwrap_or_default();

    match cli.command {
        Commands::Locate { at } => {
            let service = build_service(&config, at)?;
            let fix = service.initialize().await.unwrap_or_else(|e| fail(&e));

            if cli.json {
                print_json(&Report {
                    result: fix.reading(),
                    session: Some(&service.snapshot()),
                })?;
            } else {
                println!("{}", output::location_line(&fix));
            }
        },

        Commands::Search { query } => {
            let service = build_service(&config, None)?;
            let point = service
                .search(&query)
                .await
                .unwrap_or_else(|e| fail(&e))
                .into_inner();

            if cli.json {
                print_json(&Report {
                    result: point,
                    session: None,
                })?;
            } else {
                println!("🔎 {query}: {}", output::point_line(&point));
            }
        },

        Commands::Directions { query, at } => {
            let service = build_service(&config, at)?;
            service.initialize().await.unwrap_or_else(|e| fail(&e));
            service.search(&query).await.unwrap_or_else(|e| fail(&e));
            let directions = service
                .request_directions()
                .await
                .unwrap_or_else(|e| fail(&e))
                .into_inner();

            if cli.json {
                print_json(&Report {
                    result: &directions,
                    session: Some(&service.snapshot()),
                })?;
            } else {
                println!("{}", output::directions_summary(&directions));
                for line in output::path_lines(&directions.path) {
                    println!("{line}");
                }
            }
        },

        Commands::Recenter { target, query, at } => {
            let service = build_service(&config, at)?;
            if target == RecenterTarget::Me {
                service.initialize().await.unwrap_or_else(|e| fail(&e));
            }
            if let Some(query) = query {
                service.search(&query).await.unwrap_or_else(|e| fail(&e));
            }
            let point = service.recenter(target).unwrap_or_else(|e| fail(&e));

            if cli.json {
                print_json(&Report {
                    result: point,
                    session: None,
                })?;
            } else {
                println!("🎯 {target}: {}", output::point_line(&point));
            }
        },

        Commands::Decode { encoded } => {
            let points = polyline::decode(&encoded)
                .unwrap_or_else(|e| fail(&ApplicationError::Domain(e)));

            if cli.json {
                print_json(&points)?;
            } else {
                for line in output::path_lines(&points) {
                    println!("{line}");
                }
            }
        },

        Commands::Encode { points } => {
            let encoded = EncodedGeometry::from_points(&points);

            if cli.json {
                print_json(&encoded)?;
            } else {
                println!("{encoded}");
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_zero() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), "info");
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), "debug");
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn encode_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["wayfinder-cli", "encode", "38.5,-120.2", "-33.9,151.2"])
            .unwrap();
        match cli.command {
            Commands::Encode { points } => assert_eq!(points.len(), 2),
            _ => panic!("Expected Encode command"),
        }
    }

    #[test]
    fn build_service_without_api_key() {
        let service = build_service(&AppConfig::default(), None).unwrap();
        assert!(service.snapshot().current.is_none());
    }
}
