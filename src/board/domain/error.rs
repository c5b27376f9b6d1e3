//! Error types for board domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// No task with the identifier exists in the list.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Two tasks in one list share an identifier.
    #[error("duplicate task identifier: {0}")]
    DuplicateTaskId(TaskId),

    /// A stored due date lies outside the representable calendar range.
    #[error("task {0} has an out-of-range due date")]
    InvalidDueDate(TaskId),

    /// The form was submitted while closed.
    #[error("task form is not open")]
    FormClosed,
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
