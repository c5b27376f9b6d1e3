//! Domain model for the task board.
//!
//! Tasks, their status columns, form input, search filtering and the
//! add/edit form state machine live here, free of persistence concerns.

mod draft;
mod error;
mod filter;
mod form;
mod ids;
mod task;

pub use draft::TaskDraft;
pub use error::{BoardDomainError, ParseTaskPriorityError, ParseTaskStatusError};
pub use filter::{BoardColumns, TaskFilter};
pub use form::{FormMode, FormSubmission, TaskForm};
pub use ids::TaskId;
pub use task::{Task, TaskPriority, TaskStatus};
