//! Application layer - Use cases and orchestration
//!
//! Contains the session state coordinator, the services behind each user
//! action, and the port definitions implemented by infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, RouteEndpoint};
pub use ports::*;
pub use services::*;
