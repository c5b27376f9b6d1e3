//! Session gate: mirrors the identity provider into observable state.

use crate::session::{
    domain::{Identity, SessionRoute, SessionState},
    ports::{IdentityProvider, IdentityProviderError},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Service-level errors for session operations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The user abandoned the sign-in flow. Retrying is safe.
    #[error("sign-in was cancelled")]
    SignInCancelled,

    /// The provider could not complete sign-in. Retrying is safe.
    #[error("sign-in failed: {0}")]
    SignInFailed(IdentityProviderError),

    /// Another sign-in attempt has not finished yet.
    #[error("a sign-in attempt is already in progress")]
    SignInInProgress,

    /// Subscribing to identity changes failed.
    #[error("identity subscription failed: {0}")]
    Subscription(IdentityProviderError),
}

impl SessionError {
    /// Returns whether the user can simply try again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SignInCancelled | Self::SignInFailed(_))
    }
}

/// Result type for session service operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Tracks the signed-in identity and gates access to the board.
///
/// The gate owns a background listener fed by the provider's notification
/// stream. Dropping the gate (or calling [`Self::shutdown`]) stops the
/// listener and releases the provider registration.
pub struct SessionGate<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    state: watch::Receiver<SessionState>,
    listener: JoinHandle<()>,
    sign_in_pending: AtomicBool,
}

impl<P> SessionGate<P>
where
    P: IdentityProvider + 'static,
{
    /// Subscribes to the provider and starts mirroring identity changes.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Subscription`] when the provider refuses the
    /// registration.
    pub fn start(provider: Arc<P>) -> SessionResult<Self> {
        let mut notifications = provider.subscribe().map_err(SessionError::Subscription)?;
        let (publisher, state) = watch::channel(SessionState::initial());

        let listener = tokio::spawn(async move {
            while let Some(identity) = notifications.recv().await {
                debug!(
                    user_id = identity.as_ref().map(|id| id.user_id().as_str()),
                    "identity notification received"
                );
                publisher.send_modify(|current| current.apply_notification(identity));
            }
            debug!("identity notification stream closed");
        });

        Ok(Self {
            provider,
            state,
            listener,
            sign_in_pending: AtomicBool::new(false),
        })
    }
}

impl<P> SessionGate<P>
where
    P: IdentityProvider,
{
    /// Returns a consistent snapshot of the session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Returns the route the UI should present right now.
    #[must_use]
    pub fn route(&self) -> SessionRoute {
        self.state.borrow().route()
    }

    /// Returns a receiver that observes every published session state.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Returns whether a sign-in attempt is currently running.
    #[must_use]
    pub fn is_signing_in(&self) -> bool {
        self.sign_in_pending.load(Ordering::Acquire)
    }

    /// Runs the provider's interactive sign-in flow.
    ///
    /// Session state is not touched here: the provider's notification
    /// stream carries the new identity, and a failed attempt leaves the
    /// state as it was.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SignInInProgress`] when an attempt is already
    /// running, [`SessionError::SignInCancelled`] when the user abandons the
    /// flow, or [`SessionError::SignInFailed`] for any other provider
    /// failure.
    pub async fn sign_in(&self) -> SessionResult<Identity> {
        let _pending = PendingSignIn::acquire(&self.sign_in_pending)?;
        match self.provider.sign_in().await {
            Ok(identity) => {
                info!(user_id = %identity.user_id(), "sign-in succeeded");
                Ok(identity)
            }
            Err(IdentityProviderError::Cancelled) => {
                info!("sign-in cancelled");
                Err(SessionError::SignInCancelled)
            }
            Err(err) => {
                warn!(error = %err, "sign-in failed");
                Err(SessionError::SignInFailed(err))
            }
        }
    }

    /// Stops mirroring identity changes.
    pub fn shutdown(&self) {
        self.listener.abort();
    }
}

impl<P> Drop for SessionGate<P>
where
    P: IdentityProvider,
{
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// Clears the pending flag when the sign-in attempt ends, however it ends.
struct PendingSignIn<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PendingSignIn<'a> {
    fn acquire(flag: &'a AtomicBool) -> SessionResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SessionError::SignInInProgress)?;
        Ok(Self { flag })
    }
}

impl Drop for PendingSignIn<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
