//! Shared world state for session gate scenarios.

use std::sync::Arc;

use kanban_board::session::{
    adapters::memory::InMemoryIdentityProvider,
    domain::{Identity, SessionRoute, UserId},
    services::{SessionError, SessionGate},
};
use rstest::fixture;

/// Scenario world for session gate behaviour tests.
#[derive(Default)]
pub struct SessionWorld {
    pub provider: Arc<InMemoryIdentityProvider>,
    pub gate: Option<SessionGate<InMemoryIdentityProvider>>,
    pub last_sign_in: Option<Result<Identity, SessionError>>,
}

impl SessionWorld {
    /// Returns the running gate.
    pub fn gate(&self) -> Result<&SessionGate<InMemoryIdentityProvider>, eyre::Report> {
        self.gate
            .as_ref()
            .ok_or_else(|| eyre::eyre!("session gate not started in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SessionWorld {
    SessionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds an identity from a user id written in a feature file.
pub fn identity(user_id: &str) -> Result<Identity, eyre::Report> {
    Ok(Identity::new(UserId::new(user_id)?))
}

/// Parses a route name as written in feature files.
pub fn parse_route(name: &str) -> Result<SessionRoute, eyre::Report> {
    match name {
        "loading" => Ok(SessionRoute::Loading),
        "sign-in" => Ok(SessionRoute::SignIn),
        "board" => Ok(SessionRoute::Board),
        other => Err(eyre::eyre!("unknown route {other:?}")),
    }
}
