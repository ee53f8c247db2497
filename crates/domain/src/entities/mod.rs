//! Entities - Stateful domain objects

mod session_state;

pub use session_state::{SessionPhase, SessionState};
