//! Task board: task store synchronisation and the board view-model.
//!
//! The board keeps one authoritative in-memory task list per signed-in
//! user, mirrored to a single remote document keyed by the user's
//! identifier. Every mutation writes the whole list back; every remote
//! snapshot replaces the whole list. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts and the remote document shape in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
