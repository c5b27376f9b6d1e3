//! In-memory task document store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

use crate::board::ports::{
    DocumentSnapshots, StoredTask, TaskDocument, TaskDocumentStore, TaskDocumentStoreError,
    TaskDocumentStoreResult,
};
use crate::session::domain::UserId;

/// Thread-safe in-memory document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskDocumentStore {
    state: Arc<RwLock<InMemoryDocumentState>>,
}

#[derive(Debug, Default)]
struct InMemoryDocumentState {
    documents: HashMap<UserId, TaskDocument>,
    watchers: HashMap<UserId, Vec<mpsc::UnboundedSender<Option<TaskDocument>>>>,
    failing_writes: usize,
    writes: usize,
}

impl InMemoryDocumentState {
    fn publish(&mut self, user: &UserId) {
        let snapshot = self.documents.get(user).cloned();
        if let Some(watchers) = self.watchers.get_mut(user) {
            watchers.retain(|watcher| watcher.send(snapshot.clone()).is_ok());
        }
    }

    fn take_write_failure(&mut self) -> TaskDocumentStoreResult<()> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(TaskDocumentStoreError::unavailable(std::io::Error::other(
                "injected write failure",
            )));
        }
        self.writes += 1;
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskDocumentStoreError {
    TaskDocumentStoreError::unavailable(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding one user's document.
    #[must_use]
    pub fn with_document(user: UserId, document: TaskDocument) -> Self {
        let store = Self::default();
        if let Ok(mut state) = store.state.write() {
            state.documents.insert(user, document);
        }
        store
    }

    /// Returns a copy of the user's document, if present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn document(&self, user: &UserId) -> TaskDocumentStoreResult<Option<TaskDocument>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.documents.get(user).cloned())
    }

    /// Makes the next `count` writes fail without touching stored data.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn fail_next_writes(&self, count: usize) -> TaskDocumentStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.failing_writes = count;
        Ok(())
    }

    /// Returns the number of successful writes, creations included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn write_count(&self) -> TaskDocumentStoreResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.writes)
    }

    /// Returns the number of live watches on the user's document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn watcher_count(&self, user: &UserId) -> TaskDocumentStoreResult<usize> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(watchers) = state.watchers.get_mut(user) else {
            return Ok(0);
        };
        watchers.retain(|watcher| !watcher.is_closed());
        Ok(watchers.len())
    }
}

#[async_trait]
impl TaskDocumentStore for InMemoryTaskDocumentStore {
    async fn watch(&self, user: &UserId) -> TaskDocumentStoreResult<DocumentSnapshots> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.state.write().map_err(poisoned)?;
        sender
            .send(state.documents.get(user).cloned())
            .map_err(poisoned)?;
        state.watchers.entry(user.clone()).or_default().push(sender);
        Ok(receiver)
    }

    async fn get(&self, user: &UserId) -> TaskDocumentStoreResult<Option<TaskDocument>> {
        self.document(user)
    }

    async fn create(&self, user: &UserId, document: &TaskDocument) -> TaskDocumentStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.take_write_failure()?;
        state.documents.insert(user.clone(), document.clone());
        state.publish(user);
        Ok(())
    }

    async fn overwrite_tasks(
        &self,
        user: &UserId,
        tasks: &[StoredTask],
    ) -> TaskDocumentStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.documents.contains_key(user) {
            return Err(TaskDocumentStoreError::NotFound(user.clone()));
        }
        state.take_write_failure()?;
        if let Some(document) = state.documents.get_mut(user) {
            document.tasks = tasks.to_vec();
        }
        state.publish(user);
        Ok(())
    }
}
