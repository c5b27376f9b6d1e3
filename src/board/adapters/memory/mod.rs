//! In-memory adapter implementations for testing.

mod document_store;

pub use document_store::InMemoryTaskDocumentStore;
