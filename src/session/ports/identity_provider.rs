//! Port for the external identity provider.

use crate::session::domain::Identity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Result type for identity provider operations.
pub type IdentityProviderResult<T> = Result<T, IdentityProviderError>;

/// Stream of identity change notifications.
///
/// Each item is the provider's current identity, or `None` when no user is
/// signed in. Dropping the receiver cancels the registration.
pub type IdentityNotifications = mpsc::UnboundedReceiver<Option<Identity>>;

/// Contract for an OAuth-style interactive identity provider.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - A new subscription receives the current identity as its first item
/// - Every subsequent identity change is delivered to all live subscriptions
/// - Registrations whose receiver has been dropped are released
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Runs the interactive sign-in flow.
    ///
    /// On success the provider also notifies subscribers of the new identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Cancelled`] when the user abandons
    /// the flow, or another variant when the provider rejects or cannot
    /// complete it.
    async fn sign_in(&self) -> IdentityProviderResult<Identity>;

    /// Registers for identity change notifications.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] when the provider
    /// cannot accept a registration.
    fn subscribe(&self) -> IdentityProviderResult<IdentityNotifications>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    /// The user closed or abandoned the interactive flow.
    #[error("sign-in was cancelled by the user")]
    Cancelled,

    /// The provider refused the credentials.
    #[error("sign-in rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached or failed internally.
    #[error("identity provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityProviderError {
    /// Wraps an infrastructure error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
