//! Domain layer for Wayfinder
//!
//! Contains the geographic value objects, the navigation session state and the
//! encoded-polyline codec. This layer performs no I/O and defines the
//! vocabulary shared by every other crate.

pub mod entities;
pub mod errors;
pub mod polyline;
pub mod value_objects;

pub use entities::*;
pub use errors::{DomainError, GeometryFault};
pub use value_objects::*;
