//! Port contracts for session gating.
//!
//! Ports define infrastructure-agnostic interfaces used by session services.

pub mod identity_provider;

pub use identity_provider::{
    IdentityNotifications, IdentityProvider, IdentityProviderError, IdentityProviderResult,
};
