//! Application shell: routes between sign-in and board and keeps the board
//! in step with the signed-in identity.
//!
//! [`KanbanApp`] consumes two event sources, identity changes from the
//! [`SessionGate`] and snapshots from the active [`TaskSync`], one event at a
//! time. Every handler runs to completion before the next event is taken.

use crate::board::{
    ports::TaskDocumentStore,
    services::{BoardViewModel, NoticeKind, SyncEvent, TaskStoreError, TaskSync},
};
use crate::client::PlatformClient;
use crate::session::{
    domain::{SessionRoute, SessionState, UserId},
    ports::IdentityProvider,
    services::{SessionError, SessionGate},
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Errors surfaced by the application shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session gating failed.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Opening the board's sync failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// What the shell did in response to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The session changed; the board was opened, closed or swapped.
    SessionChanged(SessionRoute),
    /// A remote snapshot replaced the board's task list.
    BoardSynced,
    /// A remote snapshot could not be applied; see the board notice.
    SyncFailed,
    /// The board's sync ended; the board stays as last seen until
    /// [`KanbanApp::retry_sync`] reopens it.
    SyncClosed,
}

struct ActiveBoard<D>
where
    D: TaskDocumentStore,
{
    view_model: BoardViewModel<D>,
    sync: Option<TaskSync>,
}

/// The signed-in application, with its gate and (when signed in) its board.
pub struct KanbanApp<I, D>
where
    I: IdentityProvider,
    D: TaskDocumentStore,
{
    client: PlatformClient<I, D>,
    gate: SessionGate<I>,
    session: watch::Receiver<SessionState>,
    board: Option<ActiveBoard<D>>,
    sign_in_error: Option<SessionError>,
}

enum Next {
    Session,
    SessionClosed,
    Sync(Option<SyncEvent>),
}

impl<I, D> KanbanApp<I, D>
where
    I: IdentityProvider + 'static,
    D: TaskDocumentStore + 'static,
{
    /// Starts the session gate for the client.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] when the identity subscription fails.
    pub fn start(client: PlatformClient<I, D>) -> AppResult<Self> {
        let gate = SessionGate::start(std::sync::Arc::clone(client.identity()))?;
        let session = gate.watch();
        Ok(Self {
            client,
            gate,
            session,
            board: None,
            sign_in_error: None,
        })
    }

    /// Returns the client the app was built from.
    #[must_use]
    pub const fn client(&self) -> &PlatformClient<I, D> {
        &self.client
    }

    /// Returns the route the UI should present.
    #[must_use]
    pub fn route(&self) -> SessionRoute {
        self.gate.route()
    }

    /// Returns the current session state.
    #[must_use]
    pub fn session(&self) -> SessionState {
        self.gate.state()
    }

    /// Returns the board, when a user is signed in.
    #[must_use]
    pub fn board(&self) -> Option<&BoardViewModel<D>> {
        self.board.as_ref().map(|active| &active.view_model)
    }

    /// Returns the board for mutation, when a user is signed in.
    pub fn board_mut(&mut self) -> Option<&mut BoardViewModel<D>> {
        self.board.as_mut().map(|active| &mut active.view_model)
    }

    /// Returns the last sign-in failure, shown as a retry prompt.
    #[must_use]
    pub const fn sign_in_error(&self) -> Option<&SessionError> {
        self.sign_in_error.as_ref()
    }

    /// Returns whether a sign-in attempt is running.
    #[must_use]
    pub fn is_signing_in(&self) -> bool {
        self.gate.is_signing_in()
    }

    /// Runs the interactive sign-in flow.
    ///
    /// The board opens when the resulting identity notification is
    /// processed by [`Self::process_next_event`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] when sign-in fails; the failure is also
    /// kept for [`Self::sign_in_error`].
    pub async fn sign_in(&mut self) -> AppResult<()> {
        match self.gate.sign_in().await {
            Ok(_) => {
                self.sign_in_error = None;
                Ok(())
            }
            Err(err) => {
                self.sign_in_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Waits for and handles the next session or sync event.
    ///
    /// Returns `None` once the session gate has stopped publishing. A board
    /// whose sync cannot be opened still opens, carrying a sync-failure
    /// notice until [`Self::retry_sync`] succeeds.
    pub async fn process_next_event(&mut self) -> Option<AppEvent> {
        let next = {
            let session = &mut self.session;
            let sync = self.board.as_mut().and_then(|active| active.sync.as_mut());
            tokio::select! {
                changed = session.changed() => {
                    if changed.is_ok() { Next::Session } else { Next::SessionClosed }
                }
                event = next_sync_event(sync) => Next::Sync(event),
            }
        };

        match next {
            Next::Session => {
                let state = self.session.borrow_and_update().clone();
                self.on_session_change(&state).await;
                Some(AppEvent::SessionChanged(state.route()))
            }
            Next::SessionClosed => None,
            Next::Sync(event) => Some(self.on_sync_event(event)),
        }
    }

    /// Stops the board's sync and the session gate.
    pub fn shutdown(mut self) {
        self.close_board();
        self.gate.shutdown();
    }

    async fn on_session_change(&mut self, state: &SessionState) {
        if state.is_loading() {
            return;
        }
        let current = self.board.as_ref().map(|active| active.view_model.user());
        if current == state.user_id() {
            return;
        }

        self.close_board();
        if let Some(user) = state.user_id() {
            self.sign_in_error = None;
            self.open_board(user.clone()).await;
        }
    }

    async fn open_board(&mut self, user: UserId) {
        let store = self.client.task_store();
        let mut view_model = BoardViewModel::new(store.clone(), user.clone());
        let sync = match store.open(user.clone()).await {
            Ok(sync) => {
                info!(user_id = %user, "board opened");
                Some(sync)
            }
            Err(err) => {
                warn!(user_id = %user, error = %err, "board opened without a live sync");
                view_model.apply_event(SyncEvent::Failed(err));
                None
            }
        };
        self.board = Some(ActiveBoard { view_model, sync });
    }

    /// Reopens the board's sync after it failed to open or ended.
    ///
    /// Returns `Ok(false)` when no board is open or its sync is already
    /// live. A successful reopen clears the board's sync-failure notice;
    /// the next snapshot arrives through [`Self::process_next_event`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the sync still cannot be opened; the
    /// board keeps showing its last list with a sync-failure notice.
    pub async fn retry_sync(&mut self) -> AppResult<bool> {
        let Some(active) = self.board.as_mut() else {
            return Ok(false);
        };
        if active.sync.is_some() {
            return Ok(false);
        }

        let user = active.view_model.user().clone();
        match self.client.task_store().open(user.clone()).await {
            Ok(sync) => {
                let sync_notice = active
                    .view_model
                    .notice()
                    .is_some_and(|notice| notice.kind() == NoticeKind::SyncFailed);
                if sync_notice {
                    active.view_model.dismiss_notice();
                }
                active.sync = Some(sync);
                info!(user_id = %user, "board sync reopened");
                Ok(true)
            }
            Err(err) => {
                warn!(user_id = %user, error = %err, "board sync still unavailable");
                active.view_model.apply_event(SyncEvent::Failed(err.clone()));
                Err(err.into())
            }
        }
    }

    /// Returns whether the open board is receiving remote snapshots.
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        self.board
            .as_ref()
            .is_some_and(|active| active.sync.is_some())
    }

    fn close_board(&mut self) {
        if let Some(active) = self.board.take() {
            info!(user_id = %active.view_model.user(), "board closed");
        }
    }

    fn on_sync_event(&mut self, event: Option<SyncEvent>) -> AppEvent {
        let Some(active) = self.board.as_mut() else {
            return AppEvent::SyncClosed;
        };
        match event {
            Some(event) => {
                let failed = matches!(event, SyncEvent::Failed(_));
                active.view_model.apply_event(event);
                if failed {
                    AppEvent::SyncFailed
                } else {
                    AppEvent::BoardSynced
                }
            }
            None => {
                debug!(user_id = %active.view_model.user(), "task sync ended");
                active.sync = None;
                AppEvent::SyncClosed
            }
        }
    }
}

async fn next_sync_event(sync: Option<&mut TaskSync>) -> Option<SyncEvent> {
    match sync {
        Some(sync) => sync.next_event().await,
        None => std::future::pending().await,
    }
}
