//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by board services,
//! together with the shape of the remote per-user document.

pub mod document;
pub mod document_store;

pub use document::{StoredTask, TaskDocument, Timestamp};
pub use document_store::{
    DocumentSnapshots, TaskDocumentStore, TaskDocumentStoreError, TaskDocumentStoreResult,
};

#[cfg(test)]
pub use document_store::MockTaskDocumentStore;
