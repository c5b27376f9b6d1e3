//! Search filtering and status partitioning of the task list.

use super::{Task, TaskStatus};

/// Case-insensitive substring search over task titles and descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    query: String,
    needle: String,
}

impl TaskFilter {
    /// Creates a filter for the given search text.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let needle = query.to_lowercase();
        Self { query, needle }
    }

    /// Returns the search text as entered.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns whether the filter lets every task through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns whether the task's title or description contains the search
    /// text, ignoring case.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.is_empty()
            || task.title().to_lowercase().contains(&self.needle)
            || task.description().to_lowercase().contains(&self.needle)
    }

    /// Returns the matching tasks in list order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// The visible tasks split into the three board columns.
///
/// Each column preserves the relative order of the underlying list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardColumns<'a> {
    todo: Vec<&'a Task>,
    in_progress: Vec<&'a Task>,
    done: Vec<&'a Task>,
}

impl<'a> BoardColumns<'a> {
    /// Filters the list and partitions the result by status.
    #[must_use]
    pub fn partition(tasks: &'a [Task], filter: &TaskFilter) -> Self {
        let mut columns = Self::default();
        for task in tasks.iter().filter(|task| filter.matches(task)) {
            columns.column_mut(task.status()).push(task);
        }
        columns
    }

    /// Returns the tasks in one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<&'a Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Returns the number of tasks shown in one column.
    #[must_use]
    pub fn count(&self, status: TaskStatus) -> usize {
        self.column(status).len()
    }

    /// Returns the number of visible tasks across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns whether no task is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over columns in board order with their status.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[&'a Task])> + '_ {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }
}
