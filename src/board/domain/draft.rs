//! Form input used to create or edit a task.

use super::{BoardDomainError, TaskPriority, TaskStatus};
use chrono::NaiveDate;

/// Parameter object carrying the user-editable task fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    /// Task title; must not be blank.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Target column.
    pub status: TaskStatus,
    /// Priority badge.
    pub priority: TaskPriority,
    /// Optional calendar due date.
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Creates a draft with the given title and default remaining fields.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns whether the draft may be submitted.
    ///
    /// A title made only of whitespace counts as blank, so such a draft is
    /// not submittable. The title itself is stored as typed.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Checks that the draft may be submitted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is empty or
    /// whitespace-only.
    pub fn validate(&self) -> Result<(), BoardDomainError> {
        if self.is_submittable() {
            Ok(())
        } else {
            Err(BoardDomainError::EmptyTitle)
        }
    }
}
