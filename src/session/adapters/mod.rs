//! Identity provider adapters.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryIdentityProvider`]: scripted provider for tests and
//!   local development

pub mod memory;
