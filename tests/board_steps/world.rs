//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemorySnapshotStore,
    domain::{BulkOutcome, ColumnId, DeletedColumn, SyncSummary, Task, TaskId},
    services::{BoardService, BoardServiceError},
};

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemorySnapshotStore, DefaultClock>;

/// Scenario world for task board behaviour tests.
#[derive(Default)]
pub struct BoardWorld {
    pub service: Option<TestBoardService>,
    pub last_sync: Option<SyncSummary>,
    pub last_bulk: Option<BulkOutcome>,
    pub last_column_deletion: Option<Result<DeletedColumn, BoardServiceError>>,
}

impl BoardWorld {
    /// Returns the service opened by a Given step.
    ///
    /// # Errors
    ///
    /// Returns an error if no board has been opened yet.
    pub fn service(&self) -> Result<&TestBoardService, eyre::Report> {
        self.service
            .as_ref()
            .ok_or_else(|| eyre!("no board opened in scenario world"))
    }

    /// Finds an active task by its exact title.
    ///
    /// # Errors
    ///
    /// Returns an error if no active task carries the title.
    pub fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        let board = run_async(self.service()?.board());
        board
            .tasks()
            .find(|task| task.title() == title)
            .cloned()
            .ok_or_else(|| eyre!("no active task titled {title}"))
    }

    /// Finds an active or archived task id by its exact title.
    ///
    /// # Errors
    ///
    /// Returns an error if no task carries the title.
    pub fn any_task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        let board = run_async(self.service()?.board());
        board
            .tasks()
            .chain(board.archived_tasks())
            .find(|task| task.title() == title)
            .map(Task::id)
            .ok_or_else(|| eyre!("no task titled {title}"))
    }

    /// Resolves a column id by title.
    ///
    /// # Errors
    ///
    /// Returns an error if no column carries the title.
    pub fn column_titled(&self, title: &str) -> Result<ColumnId, eyre::Report> {
        let board = run_async(self.service()?.board());
        board
            .find_column_by_title(title)
            .map(taskboard::board::domain::Column::id)
            .ok_or_else(|| eyre!("no column titled {title}"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Opens a board service over a fresh in-memory store.
///
/// # Errors
///
/// Returns an error if the service cannot open.
pub fn open_service() -> Result<TestBoardService, eyre::Report> {
    run_async(BoardService::open(
        Arc::new(InMemorySnapshotStore::new()),
        Arc::new(DefaultClock),
        taskboard::board::domain::BoardConfig::default(),
    ))
    .map_err(|err| eyre!("open board service: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
