//! Domain-level errors

use std::fmt;

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Encoded route geometry could not be decoded
    #[error("Malformed geometry at index {index}: {fault}")]
    MalformedGeometry { index: usize, fault: GeometryFault },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a malformed geometry error
    pub const fn malformed(index: usize, fault: GeometryFault) -> Self {
        Self::MalformedGeometry { index, fault }
    }

    /// Byte offset where decoding stopped, for geometry errors
    #[must_use]
    pub const fn geometry_index(&self) -> Option<usize> {
        match self {
            Self::MalformedGeometry { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// What went wrong while decoding an encoded polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFault {
    /// Input ended inside a value or between a latitude and its longitude
    Truncated,
    /// Byte outside the printable `?`..=`~` alphabet
    InvalidCharacter(u8),
    /// Value has more 5-bit groups than a 64-bit accumulator can hold
    Overflow,
    /// Accumulated coordinate left the valid latitude/longitude range
    OutOfRange,
}

impl fmt::Display for GeometryFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "input ends mid-value"),
            Self::InvalidCharacter(byte) => write!(f, "invalid character 0x{byte:02x}"),
            Self::Overflow => write!(f, "value too long"),
            Self::OutOfRange => write!(f, "coordinate out of range"),
        }
    }
}
