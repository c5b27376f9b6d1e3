//! Observable session state and the route derived from it.

use super::{Identity, UserId};

/// Which surface the application should present for a session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionRoute {
    /// Identity resolution is still pending; show nothing yet.
    Loading,
    /// No user is signed in; redirect to the sign-in view.
    SignIn,
    /// A user is signed in; show the board.
    Board,
}

/// Snapshot of the session as seen by readers.
///
/// Both fields are published together, so a reader never observes an
/// identity from one provider notification paired with the loading flag of
/// another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<Identity>,
    loading: bool,
}

impl SessionState {
    /// Returns the state before the provider has reported anything.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }

    /// Returns the current identity, if signed in.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns the signed-in user's identifier, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.identity.as_ref().map(Identity::user_id)
    }

    /// Returns whether identity resolution is pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the route the UI should present.
    #[must_use]
    pub const fn route(&self) -> SessionRoute {
        match (self.loading, &self.identity) {
            (true, _) => SessionRoute::Loading,
            (false, None) => SessionRoute::SignIn,
            (false, Some(_)) => SessionRoute::Board,
        }
    }

    /// Applies one provider notification.
    ///
    /// The loading flag is raised while the identity is swapped and lowered
    /// once the new identity is in place.
    pub fn apply_notification(&mut self, identity: Option<Identity>) {
        self.loading = true;
        self.identity = identity;
        self.loading = false;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}
