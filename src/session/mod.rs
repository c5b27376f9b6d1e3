//! Session gating for the Kanban board.
//!
//! The session context tracks whether a user identity is currently
//! established and gates access to the board. Identity changes are sourced
//! from an external identity provider through the [`ports::IdentityProvider`]
//! port. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
