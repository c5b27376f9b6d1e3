//! Domain model for session gating.
//!
//! A session is either loading, signed out, or signed in with an identity.
//! No infrastructure concerns cross this boundary.

mod error;
mod identity;
mod state;

pub use error::SessionDomainError;
pub use identity::{Identity, UserId};
pub use state::{SessionRoute, SessionState};
