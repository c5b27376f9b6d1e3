//! Scripted in-memory identity provider.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tokio::sync::{Notify, mpsc};

use crate::session::{
    domain::Identity,
    ports::{
        IdentityNotifications, IdentityProvider, IdentityProviderError, IdentityProviderResult,
    },
};

/// Thread-safe in-memory identity provider.
///
/// Sign-in outcomes are scripted with [`Self::script_sign_in`]; an attempt
/// with nothing scripted is reported as cancelled.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<ProviderState>>,
    sign_in_hold: Arc<Notify>,
}

#[derive(Debug, Default)]
struct ProviderState {
    current: Option<Identity>,
    listeners: Vec<mpsc::UnboundedSender<Option<Identity>>>,
    scripted: VecDeque<IdentityProviderResult<Identity>>,
    hold_sign_in: bool,
}

fn poisoned(err: impl std::fmt::Display) -> IdentityProviderError {
    IdentityProviderError::unavailable(std::io::Error::other(err.to_string()))
}

impl InMemoryIdentityProvider {
    /// Creates a provider with no signed-in user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider with a user already signed in.
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        let provider = Self::default();
        if let Ok(mut state) = provider.state.write() {
            state.current = Some(identity);
        }
        provider
    }

    /// Queues the outcome of the next [`IdentityProvider::sign_in`] call.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn script_sign_in(
        &self,
        outcome: IdentityProviderResult<Identity>,
    ) -> IdentityProviderResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.scripted.push_back(outcome);
        Ok(())
    }

    /// Makes subsequent sign-in attempts wait until [`Self::release_sign_in`].
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn hold_sign_in(&self) -> IdentityProviderResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.hold_sign_in = true;
        Ok(())
    }

    /// Lets held sign-in attempts proceed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn release_sign_in(&self) -> IdentityProviderResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.hold_sign_in = false;
        drop(state);
        self.sign_in_hold.notify_waiters();
        Ok(())
    }

    /// Changes the current identity and notifies every live subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn set_identity(&self, identity: Option<Identity>) -> IdentityProviderResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.current = identity.clone();
        state
            .listeners
            .retain(|listener| listener.send(identity.clone()).is_ok());
        Ok(())
    }

    /// Signs the current user out.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn sign_out(&self) -> IdentityProviderResult<()> {
        self.set_identity(None)
    }

    /// Returns the number of registrations whose receiver is still alive.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn listener_count(&self) -> IdentityProviderResult<usize> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.listeners.retain(|listener| !listener.is_closed());
        Ok(state.listeners.len())
    }

    fn is_held(&self) -> IdentityProviderResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.hold_sign_in)
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self) -> IdentityProviderResult<Identity> {
        loop {
            let released = self.sign_in_hold.notified();
            if !self.is_held()? {
                break;
            }
            released.await;
        }

        let outcome = {
            let mut state = self.state.write().map_err(poisoned)?;
            state
                .scripted
                .pop_front()
                .unwrap_or(Err(IdentityProviderError::Cancelled))
        };
        let identity = outcome?;
        self.set_identity(Some(identity.clone()))?;
        Ok(identity)
    }

    fn subscribe(&self) -> IdentityProviderResult<IdentityNotifications> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.state.write().map_err(poisoned)?;
        sender
            .send(state.current.clone())
            .map_err(|err| poisoned(err.to_string()))?;
        state.listeners.push(sender);
        Ok(receiver)
    }
}
