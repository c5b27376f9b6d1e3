//! Application services for task synchronisation and board interaction.

mod store;
mod view_model;

pub use store::{BootstrapPolicy, SyncEvent, TaskStore, TaskStoreError, TaskStoreResult, TaskSync};
pub use view_model::{BoardError, BoardNotice, BoardResult, BoardViewModel, NoticeKind};
