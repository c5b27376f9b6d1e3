//! File-backed document store.

mod document_store;

pub use document_store::FileTaskDocumentStore;
