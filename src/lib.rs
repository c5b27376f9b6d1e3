//! Kanban board core: session gating, task synchronisation and the board
//! view-model for a single-user task board.
//!
//! A signed-in user owns one remote document holding their whole task list.
//! The board keeps an optimistic local copy, writes the full list back after
//! every change and replaces it wholesale whenever the remote document
//! changes.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, files)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`session`]: Identity subscription and the sign-in gate
//! - [`board`]: Tasks, the per-user task document and the board view-model
//! - [`client`]: Explicitly constructed platform collaborators
//! - [`app`]: Routing between sign-in and board, driven one event at a time
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Tracing subscriber set-up

pub mod app;
pub mod board;
pub mod client;
pub mod config;
pub mod session;
pub mod telemetry;
