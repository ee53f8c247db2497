//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod device_location_port;
mod geocoding_port;
mod routing_port;

#[cfg(test)]
pub use device_location_port::MockDeviceLocationPort;
pub use device_location_port::{DeviceLocationPort, PermissionStatus, PositionFetch};
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::{RouteCandidate, RouteRequest, RoutingPort};
