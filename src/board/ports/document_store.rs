//! Repository port for the per-user task document.

use super::{StoredTask, TaskDocument};
use crate::session::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Result type for document store operations.
pub type TaskDocumentStoreResult<T> = Result<T, TaskDocumentStoreError>;

/// Live stream of document snapshots.
///
/// Each item is the document's current content, or `None` while the
/// document does not exist. Dropping the receiver cancels the watch.
pub type DocumentSnapshots = mpsc::UnboundedReceiver<Option<TaskDocument>>;

/// Key-document store holding one task document per user.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - A new watch receives the current snapshot as its first item
/// - Every successful `create` or `overwrite_tasks` is delivered to every
///   live watch on that user's document
/// - Watches whose receiver has been dropped are released
/// - Writes replace content wholesale; the last writer wins
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskDocumentStore: Send + Sync {
    /// Opens a live watch on the user's document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError::Unavailable`] when the store cannot
    /// register the watch.
    async fn watch(&self, user: &UserId) -> TaskDocumentStoreResult<DocumentSnapshots>;

    /// Reads the user's document once.
    ///
    /// Returns `None` when the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError`] when the read fails.
    async fn get(&self, user: &UserId) -> TaskDocumentStoreResult<Option<TaskDocument>>;

    /// Writes the user's document, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError`] when the write fails.
    async fn create(&self, user: &UserId, document: &TaskDocument) -> TaskDocumentStoreResult<()>;

    /// Replaces the task array of an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDocumentStoreError::NotFound`] when the document does
    /// not exist, or another variant when the write fails.
    async fn overwrite_tasks(
        &self,
        user: &UserId,
        tasks: &[StoredTask],
    ) -> TaskDocumentStoreResult<()>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskDocumentStoreError {
    /// The user's document does not exist.
    #[error("task document not found for user {0}")]
    NotFound(UserId),

    /// The stored document could not be parsed.
    #[error("malformed task document for user {user}: {reason}")]
    Malformed {
        /// Owner of the document.
        user: UserId,
        /// Parse failure.
        reason: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The store could not be reached or failed internally.
    #[error("document store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskDocumentStoreError {
    /// Wraps an infrastructure error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a parse error for a user's document.
    pub fn malformed(user: UserId, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Malformed {
            user,
            reason: Arc::new(err),
        }
    }
}
