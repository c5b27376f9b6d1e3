//! Application services for session gating.

mod gate;

pub use gate::{SessionError, SessionGate, SessionResult};
