//! Document store adapters for the task board.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryTaskDocumentStore`]: thread-safe in-memory storage for
//!   tests, with failure injection
//! - [`file::FileTaskDocumentStore`]: one JSON document per user inside a
//!   capability-scoped directory

pub mod file;
pub mod memory;
