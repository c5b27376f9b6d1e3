//! Platform client wiring the external collaborators together.
//!
//! The client is constructed once at start-up and handed to the session
//! gate and task store; nothing in the crate reaches for process-wide
//! connection state.

use crate::board::{
    adapters::file::FileTaskDocumentStore, ports::TaskDocumentStore, services::TaskStore,
};
use crate::config::{ConfigError, KanbanConfig};
use crate::session::ports::IdentityProvider;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling a client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The document store could not be opened.
    #[error("document store unavailable: {0}")]
    DocumentStore(#[from] crate::board::ports::TaskDocumentStoreError),
}

/// Shared handles to the identity provider and document store.
pub struct PlatformClient<I, D>
where
    I: IdentityProvider,
    D: TaskDocumentStore,
{
    identity: Arc<I>,
    documents: Arc<D>,
    config: KanbanConfig,
}

impl<I, D> Clone for PlatformClient<I, D>
where
    I: IdentityProvider,
    D: TaskDocumentStore,
{
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
            documents: Arc::clone(&self.documents),
            config: self.config.clone(),
        }
    }
}

impl<I, D> PlatformClient<I, D>
where
    I: IdentityProvider + 'static,
    D: TaskDocumentStore + 'static,
{
    /// Creates a client from explicit collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the configuration fails
    /// validation.
    pub fn new(
        identity: Arc<I>,
        documents: Arc<D>,
        config: KanbanConfig,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self {
            identity,
            documents,
            config,
        })
    }

    /// Returns the identity provider.
    #[must_use]
    pub const fn identity(&self) -> &Arc<I> {
        &self.identity
    }

    /// Returns the document store.
    #[must_use]
    pub const fn documents(&self) -> &Arc<D> {
        &self.documents
    }

    /// Returns the configuration in force.
    #[must_use]
    pub const fn config(&self) -> &KanbanConfig {
        &self.config
    }

    /// Returns a task store using the configured bootstrap policy.
    #[must_use]
    pub fn task_store(&self) -> TaskStore<D> {
        TaskStore::new(
            Arc::clone(&self.documents),
            self.config.sync.bootstrap_policy(),
        )
    }
}

impl<I> PlatformClient<I, FileTaskDocumentStore>
where
    I: IdentityProvider + 'static,
{
    /// Creates a client backed by the file document store in
    /// `storage.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the configuration is invalid or
    /// has no data directory, or [`ClientError::DocumentStore`] when the
    /// directory cannot be opened.
    pub fn with_file_store(identity: Arc<I>, config: KanbanConfig) -> Result<Self, ClientError> {
        let data_dir = config
            .storage
            .data_dir
            .as_deref()
            .ok_or(ConfigError::MissingField("storage.data_dir"))?;
        let documents = FileTaskDocumentStore::open(data_dir)?;
        Self::new(identity, Arc::new(documents), config)
    }
}
