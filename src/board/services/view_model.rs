//! Board view-model: the authoritative local task list and the mutations the
//! UI invokes on it.

use super::{SyncEvent, TaskStore, TaskStoreError};
use crate::board::{
    domain::{
        BoardColumns, BoardDomainError, FormSubmission, Task, TaskDraft, TaskFilter, TaskForm,
        TaskId, TaskStatus,
    },
    ports::TaskDocumentStore,
};
use crate::session::domain::UserId;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for board operations.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Persisting the list failed; the local change was kept.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Category of a non-blocking notice shown on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A remote snapshot could not be applied.
    SyncFailed,
    /// A write-back did not reach the store.
    SaveFailed,
}

/// A visible, dismissible message about a sync or save failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardNotice {
    kind: NoticeKind,
    message: String,
}

impl BoardNotice {
    fn new(kind: NoticeKind, err: &impl std::fmt::Display) -> Self {
        Self {
            kind,
            message: err.to_string(),
        }
    }

    /// Returns the notice category.
    #[must_use]
    pub const fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// View-model for one signed-in user's board.
///
/// The view-model owns the only local copy of the task list. Mutations
/// change it immediately and then write the whole list back; remote
/// snapshots replace it wholesale.
pub struct BoardViewModel<S>
where
    S: TaskDocumentStore,
{
    store: TaskStore<S>,
    user: UserId,
    tasks: Vec<Task>,
    loading: bool,
    filter: TaskFilter,
    form: TaskForm,
    picked_up: Option<TaskId>,
    notice: Option<BoardNotice>,
}

impl<S> BoardViewModel<S>
where
    S: TaskDocumentStore + 'static,
{
    /// Creates an empty, loading board for the user.
    #[must_use]
    pub fn new(store: TaskStore<S>, user: UserId) -> Self {
        Self {
            store,
            user,
            tasks: Vec::new(),
            loading: true,
            filter: TaskFilter::default(),
            form: TaskForm::new(),
            picked_up: None,
            notice: None,
        }
    }

    /// Returns the board owner.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the full, unfiltered task list.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with the identifier, if present.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns whether the first snapshot is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the current notice, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&BoardNotice> {
        self.notice.as_ref()
    }

    /// Clears the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Applies an event from the task sync.
    pub fn apply_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Replaced(tasks) => self.apply_snapshot(tasks),
            SyncEvent::Failed(err) => {
                self.notice = Some(BoardNotice::new(NoticeKind::SyncFailed, &err));
            }
        }
    }

    /// Replaces the local list with a remote snapshot.
    pub fn apply_snapshot(&mut self, tasks: Vec<Task>) {
        debug!(user_id = %self.user, tasks = tasks.len(), "applying remote snapshot");
        self.tasks = tasks;
        self.loading = false;
        let stale = self
            .picked_up
            .as_ref()
            .is_some_and(|id| !self.tasks.iter().any(|task| task.id() == id));
        if stale {
            self.picked_up = None;
        }
    }

    /// Returns the search text.
    #[must_use]
    pub fn search(&self) -> &str {
        self.filter.query()
    }

    /// Sets the search text.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter = TaskFilter::new(query);
    }

    /// Clears the search text.
    pub fn clear_search(&mut self) {
        self.filter = TaskFilter::default();
    }

    /// Returns the tasks matching the search, in list order.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    /// Returns the visible tasks split into board columns.
    #[must_use]
    pub fn columns(&self) -> BoardColumns<'_> {
        BoardColumns::partition(&self.tasks, &self.filter)
    }

    /// Returns the add/edit form.
    #[must_use]
    pub const fn form(&self) -> &TaskForm {
        &self.form
    }

    /// Returns the add/edit form for field entry.
    pub const fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    /// Opens the form to add a task to a column.
    pub fn open_add_form(&mut self, status: TaskStatus) {
        self.form.open_add(status);
    }

    /// Opens the form to edit an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when no task has the id.
    pub fn open_edit_form(&mut self, id: &TaskId) -> BoardResult<()> {
        let task = self
            .task(id)
            .ok_or_else(|| BoardDomainError::TaskNotFound(id.clone()))?
            .clone();
        self.form.open_edit(&task);
        Ok(())
    }

    /// Closes the form without saving.
    pub fn cancel_form(&mut self) {
        self.form.cancel();
    }

    /// Closes the form after a pointer press outside it.
    pub fn dismiss_form_outside(&mut self) {
        self.form.dismiss_outside();
    }

    /// Submits the form, adding or editing a task.
    ///
    /// Returns the identifier of the added or edited task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] or
    /// [`BoardDomainError::FormClosed`] without closing the form, or any
    /// error from [`Self::add_task`] / [`Self::edit_task`].
    pub async fn submit_form(&mut self) -> BoardResult<TaskId> {
        match self.form.submit()? {
            FormSubmission::Add(draft) => self.add_task(draft).await,
            FormSubmission::Edit(id, draft) => {
                self.edit_task(&id, draft).await?;
                Ok(id)
            }
        }
    }

    /// Appends a new task and writes the list back.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] for a blank title (nothing is
    /// added), [`BoardDomainError::DuplicateTaskId`] if the generated id is
    /// already taken, or [`BoardError::Store`] when the write-back fails.
    pub async fn add_task(&mut self, draft: TaskDraft) -> BoardResult<TaskId> {
        let task = Task::create(draft)?;
        if self.task(task.id()).is_some() {
            return Err(BoardDomainError::DuplicateTaskId(task.id().clone()).into());
        }
        let id = task.id().clone();
        self.tasks.push(task);
        debug!(user_id = %self.user, task_id = %id, "task added");
        self.write_back().await?;
        Ok(id)
    }

    /// Replaces an existing task's fields and writes the list back.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] for an unknown id,
    /// [`BoardDomainError::EmptyTitle`] for a blank title, or
    /// [`BoardError::Store`] when the write-back fails.
    pub async fn edit_task(&mut self, id: &TaskId, draft: TaskDraft) -> BoardResult<()> {
        let task = self.task_mut(id)?;
        task.apply_draft(draft)?;
        debug!(user_id = %self.user, task_id = %id, "task edited");
        self.write_back().await
    }

    /// Removes a task and writes the list back.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] for an unknown id, or
    /// [`BoardError::Store`] when the write-back fails.
    pub async fn delete_task(&mut self, id: &TaskId) -> BoardResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        if self.tasks.len() == before {
            return Err(BoardDomainError::TaskNotFound(id.clone()).into());
        }
        if self.picked_up.as_ref() == Some(id) {
            self.picked_up = None;
        }
        debug!(user_id = %self.user, task_id = %id, "task deleted");
        self.write_back().await
    }

    /// Records the task being dragged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] for an unknown id.
    pub fn pick_up(&mut self, id: &TaskId) -> BoardResult<()> {
        if self.task(id).is_none() {
            return Err(BoardDomainError::TaskNotFound(id.clone()).into());
        }
        self.picked_up = Some(id.clone());
        Ok(())
    }

    /// Returns the task being dragged, if any.
    #[must_use]
    pub const fn picked_up(&self) -> Option<&TaskId> {
        self.picked_up.as_ref()
    }

    /// Drops the dragged task onto a column.
    ///
    /// Returns `Ok(false)` when nothing was picked up or the picked-up task
    /// no longer exists; nothing is written in that case.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the write-back fails.
    pub async fn drop_on(&mut self, status: TaskStatus) -> BoardResult<bool> {
        let Some(id) = self.picked_up.take() else {
            return Ok(false);
        };
        self.move_task(&id, status).await
    }

    /// Moves a task to a column and writes the list back.
    ///
    /// Returns `Ok(false)` when no task has the id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the write-back fails.
    pub async fn move_task(&mut self, id: &TaskId, status: TaskStatus) -> BoardResult<bool> {
        let Ok(task) = self.task_mut(id) else {
            return Ok(false);
        };
        task.set_status(status);
        debug!(user_id = %self.user, task_id = %id, status = status.as_str(), "task moved");
        self.write_back().await?;
        Ok(true)
    }

    fn task_mut(&mut self, id: &TaskId) -> Result<&mut Task, BoardDomainError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| BoardDomainError::TaskNotFound(id.clone()))
    }

    async fn write_back(&mut self) -> BoardResult<()> {
        let result = self.store.replace_tasks(&self.user, &self.tasks).await;
        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(user_id = %self.user, error = %err, "keeping unsaved local changes");
                self.notice = Some(BoardNotice::new(NoticeKind::SaveFailed, &err));
                Err(err.into())
            }
        }
    }
}
