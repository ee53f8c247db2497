//! Camera recenter target selection

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which stored position the map camera should move to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecenterTarget {
    /// The device's current position
    Me,
    /// The resolved search destination
    Search,
}

impl fmt::Display for RecenterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Me => write!(f, "me"),
            Self::Search => write!(f, "search"),
        }
    }
}

impl std::str::FromStr for RecenterTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "me" => Ok(Self::Me),
            "search" => Ok(Self::Search),
            _ => Err(format!("Invalid recenter target: {s}. Use 'me' or 'search'")),
        }
    }
}
