//! Shared world state for board synchronisation scenarios.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use kanban_board::board::{
    adapters::memory::InMemoryTaskDocumentStore,
    domain::{Task, TaskDraft, TaskId, TaskPriority, TaskStatus},
    ports::TaskDocument,
    services::{BoardError, BoardViewModel, BootstrapPolicy, TaskStore},
};
use kanban_board::session::domain::UserId;
use rstest::fixture;

/// View-model type used by the BDD world.
pub type TestBoard = BoardViewModel<InMemoryTaskDocumentStore>;

/// Scenario world for board behaviour tests.
pub struct BoardWorld {
    pub user: UserId,
    pub documents: InMemoryTaskDocumentStore,
    pub board: Option<TestBoard>,
    pub initial_tasks: Vec<Task>,
    pub moved_task: Option<TaskId>,
    pub last_result: Option<Result<(), BoardError>>,
}

impl BoardWorld {
    /// Creates a world with no board and an empty document store.
    ///
    /// # Panics
    ///
    /// Panics if the fixed user id is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: UserId::new("uid-scenario").expect("valid user id"),
            documents: InMemoryTaskDocumentStore::new(),
            board: None,
            initial_tasks: Vec::new(),
            moved_task: None,
            last_result: None,
        }
    }

    /// Returns a task store over the world's documents.
    #[must_use]
    pub fn task_store(&self) -> TaskStore<InMemoryTaskDocumentStore> {
        TaskStore::new(
            Arc::new(self.documents.clone()),
            BootstrapPolicy::new(Duration::from_millis(5), 2),
        )
    }

    /// Returns the open board.
    pub fn board(&self) -> Result<&TestBoard, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no board open in scenario world"))
    }

    /// Returns the open board for mutation.
    pub fn board_mut(&mut self) -> Result<&mut TestBoard, eyre::Report> {
        self.board
            .as_mut()
            .ok_or_else(|| eyre::eyre!("no board open in scenario world"))
    }

    /// Returns the stored document for the world's user.
    pub fn stored(&self) -> Result<TaskDocument, eyre::Report> {
        self.documents
            .document(&self.user)?
            .ok_or_else(|| eyre::eyre!("task document missing"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a column name as written in feature files.
pub fn parse_status(name: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(name).map_err(|err| eyre::eyre!("{err}"))
}

/// Parses a task id as written in feature files.
pub fn parse_task_id(id: &str) -> Result<TaskId, eyre::Report> {
    TaskId::new(id).map_err(|err| eyre::eyre!("{err}"))
}

/// The five starter tasks every new board used to ship with.
pub fn sample_tasks() -> Result<Vec<Task>, eyre::Report> {
    let rows = [
        (
            "1",
            "Research market trends",
            "Find latest market trends for our product category",
            TaskStatus::Todo,
            TaskPriority::High,
            (2025, 5, 10),
        ),
        (
            "2",
            "Design new homepage",
            "Create wireframes for the new homepage layout",
            TaskStatus::InProgress,
            TaskPriority::Medium,
            (2025, 5, 15),
        ),
        (
            "3",
            "Fix navigation bug",
            "Address the issue with dropdown menu in mobile view",
            TaskStatus::InProgress,
            TaskPriority::High,
            (2025, 5, 6),
        ),
        (
            "4",
            "Update user documentation",
            "Update the user guide with new features",
            TaskStatus::Todo,
            TaskPriority::Low,
            (2025, 5, 20),
        ),
        (
            "5",
            "Prepare Q2 report",
            "Gather data and prepare quarterly report",
            TaskStatus::Done,
            TaskPriority::Medium,
            (2025, 5, 2),
        ),
    ];

    rows.into_iter()
        .map(|(id, title, description, status, priority, (year, month, day))| {
            let due = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| eyre::eyre!("invalid sample date"))?;
            let draft = TaskDraft::new(title)
                .with_description(description)
                .with_status(status)
                .with_priority(priority)
                .with_due_date(due);
            Ok(Task::with_id(parse_task_id(id)?, draft)?)
        })
        .collect()
}
