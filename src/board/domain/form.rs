//! Add/edit form state machine.
//!
//! ```text
//! Closed --open_add--> Adding
//! Closed --open_edit--> Editing(id)
//! Adding | Editing --submit | cancel | dismiss_outside--> Closed
//! ```

use super::{BoardDomainError, Task, TaskDraft, TaskId, TaskStatus};

/// Which form, if any, is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    /// No form is showing.
    #[default]
    Closed,
    /// The form is creating a new task.
    Adding,
    /// The form is editing the task with this identifier.
    Editing(TaskId),
}

/// What a successful submission asks the board to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// Append a new task built from the draft.
    Add(TaskDraft),
    /// Replace the fields of an existing task.
    Edit(TaskId, TaskDraft),
}

/// Form state plus the fields being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskForm {
    mode: FormMode,
    fields: TaskDraft,
}

impl TaskForm {
    /// Creates a closed form with default fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Returns whether the form is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.mode, FormMode::Closed)
    }

    /// Returns the current field values.
    #[must_use]
    pub const fn fields(&self) -> &TaskDraft {
        &self.fields
    }

    /// Returns the field values for editing.
    pub const fn fields_mut(&mut self) -> &mut TaskDraft {
        &mut self.fields
    }

    /// Returns whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_open() && self.fields.is_submittable()
    }

    /// Opens a blank form for a new task in the given column.
    pub fn open_add(&mut self, status: TaskStatus) {
        self.mode = FormMode::Adding;
        self.fields = TaskDraft::default().with_status(status);
    }

    /// Opens the form pre-populated from an existing task.
    pub fn open_edit(&mut self, task: &Task) {
        self.mode = FormMode::Editing(task.id().clone());
        self.fields = task.to_draft();
    }

    /// Closes the form and resets its fields.
    pub fn cancel(&mut self) {
        self.mode = FormMode::Closed;
        self.fields = TaskDraft::default();
    }

    /// Handles a pointer press outside the form region.
    pub fn dismiss_outside(&mut self) {
        if self.is_open() {
            self.cancel();
        }
    }

    /// Takes the submission and closes the form.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::FormClosed`] when no form is showing, or
    /// [`BoardDomainError::EmptyTitle`] when the title is blank; in both
    /// cases the form is left as it was.
    pub fn submit(&mut self) -> Result<FormSubmission, BoardDomainError> {
        if !self.is_open() {
            return Err(BoardDomainError::FormClosed);
        }
        self.fields.validate()?;

        let mode = std::mem::take(&mut self.mode);
        let draft = std::mem::take(&mut self.fields);
        match mode {
            FormMode::Editing(id) => Ok(FormSubmission::Edit(id, draft)),
            FormMode::Adding | FormMode::Closed => Ok(FormSubmission::Add(draft)),
        }
    }
}
