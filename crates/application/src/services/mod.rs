//! Application services

mod geocoder;
mod location_acquirer;
mod navigation_service;
mod route_planner;
mod session_coordinator;

pub use geocoder::Geocoder;
pub use location_acquirer::{AcquisitionState, LocationAcquirer, LocationFix};
pub use navigation_service::{Directions, NavigationService, Sequenced};
pub use route_planner::RoutePlanner;
pub use session_coordinator::{DestinationTicket, PathTicket, SessionCoordinator};
