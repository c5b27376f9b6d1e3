//! In-memory adapter implementations for testing.

mod identity_provider;

pub use identity_provider::InMemoryIdentityProvider;
