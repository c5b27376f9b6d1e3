//! Remote document shape and the task codec.
//!
//! One document per user holds the whole task list:
//!
//! ```json
//! { "tasks": [ { "id": "1", "title": "Fix bug", "description": "",
//!                "status": "todo", "priority": "high",
//!                "dueDate": { "seconds": 1746835200, "nanoseconds": 0 } } ] }
//! ```
//!
//! `dueDate` is omitted entirely for tasks without a due date.

use crate::board::domain::{BoardDomainError, Task, TaskDraft, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Platform timestamp: seconds and nanoseconds since the Unix epoch, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since the epoch.
    pub seconds: i64,
    /// Sub-second nanoseconds.
    #[serde(default)]
    pub nanoseconds: u32,
}

impl Timestamp {
    /// Encodes a calendar date as midnight UTC on that date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        let seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        Self {
            seconds,
            nanoseconds: 0,
        }
    }

    /// Decodes the UTC calendar date this timestamp falls on.
    ///
    /// Returns `None` when the timestamp is outside chrono's range.
    #[must_use]
    pub fn to_date(self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds).map(|moment| moment.date_naive())
    }
}

/// One task as stored in the remote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTask {
    /// Task identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description; absent in the document means empty.
    #[serde(default)]
    pub description: String,
    /// Board column.
    pub status: TaskStatus,
    /// Priority; absent in the document means medium.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Due date; the key is absent when the task has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
}

impl From<&Task> for StoredTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().as_str().to_owned(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date().map(Timestamp::from_date),
        }
    }
}

impl TryFrom<StoredTask> for Task {
    type Error = BoardDomainError;

    fn try_from(stored: StoredTask) -> Result<Self, Self::Error> {
        let id = TaskId::new(stored.id)?;
        let due_date = match stored.due_date {
            Some(timestamp) => Some(
                timestamp
                    .to_date()
                    .ok_or_else(|| BoardDomainError::InvalidDueDate(id.clone()))?,
            ),
            None => None,
        };
        let draft = TaskDraft {
            title: stored.title,
            description: stored.description,
            status: stored.status,
            priority: stored.priority,
            due_date,
        };
        Ok(Self::from_persisted(id, draft))
    }
}

/// The per-user remote document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskDocument {
    /// The whole task list, in board order.
    #[serde(default)]
    pub tasks: Vec<StoredTask>,
}

impl TaskDocument {
    /// Returns the document written for a user who has none yet.
    #[must_use]
    pub const fn empty() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Encodes a task list.
    #[must_use]
    pub fn encode(tasks: &[Task]) -> Self {
        Self {
            tasks: tasks.iter().map(StoredTask::from).collect(),
        }
    }

    /// Decodes the document into a task list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskId`] or
    /// [`BoardDomainError::InvalidDueDate`] for a malformed task, and
    /// [`BoardDomainError::DuplicateTaskId`] when two tasks share an id.
    pub fn decode(self) -> Result<Vec<Task>, BoardDomainError> {
        let mut seen = HashSet::with_capacity(self.tasks.len());
        self.tasks
            .into_iter()
            .map(|stored| {
                let task = Task::try_from(stored)?;
                if !seen.insert(task.id().clone()) {
                    return Err(BoardDomainError::DuplicateTaskId(task.id().clone()));
                }
                Ok(task)
            })
            .collect()
    }
}
