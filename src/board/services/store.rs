//! Task store: mirrors one user's remote document into local task lists.

use crate::board::{
    domain::{BoardDomainError, Task},
    ports::{DocumentSnapshots, TaskDocument, TaskDocumentStore, TaskDocumentStoreError},
};
use crate::session::domain::UserId;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How a missing document is initialised and re-read.
///
/// The store creates an empty document, waits `retry_delay`, then re-reads;
/// it gives up after `max_retries` reads that still find nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapPolicy {
    retry_delay: Duration,
    max_retries: u32,
}

impl BootstrapPolicy {
    /// Creates a policy; at least one re-read is always attempted.
    #[must_use]
    pub fn new(retry_delay: Duration, max_retries: u32) -> Self {
        Self {
            retry_delay,
            max_retries: max_retries.max(1),
        }
    }

    /// Returns the wait before each re-read.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the maximum number of re-reads.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl Default for BootstrapPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 1)
    }
}

/// Errors surfaced by the task store.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The document store failed.
    #[error(transparent)]
    Store(#[from] TaskDocumentStoreError),

    /// The remote document held tasks that could not be decoded.
    #[error("remote task list rejected: {0}")]
    Decode(#[from] BoardDomainError),

    /// A newly created document never became readable.
    #[error("task document for user {user} still missing after {attempts} re-reads")]
    BootstrapExhausted {
        /// Owner of the document.
        user: UserId,
        /// Re-reads attempted.
        attempts: u32,
    },
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Notification from a live sync to the view-model.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// The remote list changed; replace the local list wholesale.
    Replaced(Vec<Task>),
    /// A snapshot could not be turned into a task list.
    Failed(TaskStoreError),
}

/// Reads and writes whole task lists against the document store.
pub struct TaskStore<S>
where
    S: TaskDocumentStore,
{
    documents: Arc<S>,
    policy: BootstrapPolicy,
}

impl<S> Clone for TaskStore<S>
where
    S: TaskDocumentStore,
{
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            policy: self.policy,
        }
    }
}

impl<S> TaskStore<S>
where
    S: TaskDocumentStore + 'static,
{
    /// Creates a task store over a document store.
    #[must_use]
    pub const fn new(documents: Arc<S>, policy: BootstrapPolicy) -> Self {
        Self { documents, policy }
    }

    /// Returns the bootstrap policy in force.
    #[must_use]
    pub const fn policy(&self) -> BootstrapPolicy {
        self.policy
    }

    /// Opens a live sync on the user's document.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Store`] when the watch cannot be opened.
    pub async fn open(&self, user: UserId) -> TaskStoreResult<TaskSync> {
        let snapshots = self.documents.watch(&user).await?;
        let (events_tx, events) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_sync(self.clone(), user.clone(), snapshots, events_tx));
        info!(user_id = %user, "task sync opened");
        Ok(TaskSync {
            user,
            events,
            worker,
        })
    }

    /// Reads the user's task list, bootstrapping an empty document if none
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the read, creation or decoding fails,
    /// or when the document is still missing after every re-read.
    pub async fn load(&self, user: &UserId) -> TaskStoreResult<Vec<Task>> {
        match self.documents.get(user).await? {
            Some(document) => Ok(document.decode()?),
            None => self.bootstrap(user).await,
        }
    }

    /// Overwrites the remote task array with `tasks`.
    ///
    /// The whole list is written; concurrent writers overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Store`] when the write fails.
    pub async fn replace_tasks(&self, user: &UserId, tasks: &[Task]) -> TaskStoreResult<()> {
        let document = TaskDocument::encode(tasks);
        self.documents
            .overwrite_tasks(user, &document.tasks)
            .await
            .inspect_err(|err| warn!(user_id = %user, error = %err, "task write-back failed"))?;
        debug!(user_id = %user, tasks = tasks.len(), "task list written back");
        Ok(())
    }

    async fn bootstrap(&self, user: &UserId) -> TaskStoreResult<Vec<Task>> {
        info!(user_id = %user, "task document missing; creating an empty one");
        self.documents.create(user, &TaskDocument::empty()).await?;

        for attempt in 1..=self.policy.max_retries {
            tokio::time::sleep(self.policy.retry_delay).await;
            if let Some(document) = self.documents.get(user).await? {
                debug!(user_id = %user, attempt, "bootstrapped task document readable");
                return Ok(document.decode()?);
            }
        }

        Err(TaskStoreError::BootstrapExhausted {
            user: user.clone(),
            attempts: self.policy.max_retries,
        })
    }

    async fn resolve(&self, user: &UserId, snapshot: Option<TaskDocument>) -> SyncEvent {
        let result = match snapshot {
            Some(document) => document.decode().map_err(TaskStoreError::from),
            None => self.load(user).await,
        };
        match result {
            Ok(tasks) => SyncEvent::Replaced(tasks),
            Err(err) => {
                warn!(user_id = %user, error = %err, "task snapshot rejected");
                SyncEvent::Failed(err)
            }
        }
    }
}

async fn run_sync<S>(
    store: TaskStore<S>,
    user: UserId,
    mut snapshots: DocumentSnapshots,
    events: mpsc::UnboundedSender<SyncEvent>,
) where
    S: TaskDocumentStore + 'static,
{
    while let Some(snapshot) = snapshots.recv().await {
        let event = store.resolve(&user, snapshot).await;
        if events.send(event).is_err() {
            break;
        }
    }
    debug!(user_id = %user, "task sync stopped");
}

/// Handle to a live sync on one user's document.
///
/// Dropping the handle (or calling [`Self::close`]) cancels the watch.
#[derive(Debug)]
pub struct TaskSync {
    user: UserId,
    events: mpsc::UnboundedReceiver<SyncEvent>,
    worker: JoinHandle<()>,
}

impl TaskSync {
    /// Returns the user whose document is being watched.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Waits for the next sync event.
    ///
    /// Returns `None` once the underlying watch has ended.
    pub async fn next_event(&mut self) -> Option<SyncEvent> {
        self.events.recv().await
    }

    /// Stops the sync and releases the watch.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for TaskSync {
    fn drop(&mut self) {
        self.worker.abort();
        debug!(user_id = %self.user, "task sync closed");
    }
}
