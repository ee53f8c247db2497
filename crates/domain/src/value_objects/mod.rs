//! Value Objects - Immutable, identity-less domain primitives

mod encoded_geometry;
mod geo_point;
mod location_reading;
mod recenter_target;

pub use encoded_geometry::EncodedGeometry;
pub use geo_point::GeoPoint;
pub use location_reading::LocationReading;
pub use recenter_target::RecenterTarget;
