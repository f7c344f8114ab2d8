//! Single-writer orchestration over the board aggregate.
//!
//! Every mutation runs against a working copy of the board while holding the
//! writer lock. The copy replaces the live board only after its snapshot has
//! been saved, so a failed save leaves both the live board and the stored
//! snapshot unchanged.

use crate::board::{
    domain::{
        Board, BoardConfig, BoardDomainError, BulkOperation, BulkOutcome, Column, ColumnDeletion,
        ColumnId, ColumnPatch, ColumnSuggestion, DeletedColumn, MoveOutcome, MoveTask, NewColumn,
        NewTask, SyncSummary, Task, TaskFilter, TaskId, TaskPatch, TrackerCandidate,
    },
    ports::{BoardSnapshot, BoardSnapshotStore, SnapshotStoreError, TrackerSource},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// A board rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The snapshot store failed to load or save.
    #[error(transparent)]
    Store(#[from] SnapshotStoreError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board orchestration service.
///
/// Clones share the same board and writer lock.
pub struct BoardService<S, C>
where
    S: BoardSnapshotStore,
    C: Clock + Send + Sync,
{
    board: Arc<Mutex<Board>>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for BoardService<S, C>
where
    S: BoardSnapshotStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            board: Arc::clone(&self.board),
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> BoardService<S, C>
where
    S: BoardSnapshotStore,
    C: Clock + Send + Sync,
{
    /// Loads the stored board, or seeds a fresh one from `config` and saves
    /// it when nothing is stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the snapshot cannot be read,
    /// is corrupt, or the fresh board cannot be saved, and
    /// [`BoardServiceError::Domain`] when the configured initial columns are
    /// invalid.
    pub async fn open(store: Arc<S>, clock: Arc<C>, config: BoardConfig) -> BoardServiceResult<Self> {
        let board = if let Some(snapshot) = store.load().await? {
            let board = snapshot.into_board(config)?;
            tracing::info!(
                columns = board.column_count(),
                tasks = board.active_task_count(),
                archived = board.archive_len(),
                "board loaded from snapshot"
            );
            board
        } else {
            let board = Board::seeded(config)?;
            store.save(&BoardSnapshot::capture(&board)).await?;
            tracing::info!(columns = board.column_count(), "fresh board created");
            board
        };
        Ok(Self {
            board: Arc::new(Mutex::new(board)),
            store,
            clock,
        })
    }

    /// Returns a copy of the current board.
    pub async fn board(&self) -> Board {
        self.board.lock().await.clone()
    }

    /// Returns archived tasks, most recently archived first.
    pub async fn archive(&self) -> Vec<Task> {
        self.board
            .lock()
            .await
            .archived_tasks()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns active tasks matching `filter` in board order.
    pub async fn query(&self, filter: &TaskFilter) -> Vec<Task> {
        self.board.lock().await.query(filter).cloned().collect()
    }

    /// Returns column suggestions for the current workload.
    pub async fn suggestions(&self) -> Vec<ColumnSuggestion> {
        self.board.lock().await.suggestions()
    }

    /// Creates a personal task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when validation fails or the snapshot
    /// cannot be saved.
    pub async fn create_task(&self, request: NewTask) -> BoardServiceResult<Task> {
        self.mutate(|board, clock| board.create_task(&request, clock))
            .await
    }

    /// Edits an active task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the task is unknown, the patch is
    /// invalid, or the snapshot cannot be saved.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> BoardServiceResult<Task> {
        self.mutate(|board, clock| board.update_task(id, &patch, clock))
            .await
    }

    /// Permanently deletes an active task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the task is unknown or the snapshot
    /// cannot be saved.
    pub async fn delete_task(&self, id: TaskId) -> BoardServiceResult<Task> {
        self.mutate(|board, _| board.delete_task(id)).await
    }

    /// Moves a task between or within columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the move is invalid or the snapshot
    /// cannot be saved.
    pub async fn move_task(&self, request: MoveTask) -> BoardServiceResult<MoveOutcome> {
        self.mutate(|board, _| board.move_task(request)).await
    }

    /// Appends a new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the column is invalid, the column
    /// limit is reached, or the snapshot cannot be saved.
    pub async fn add_column(&self, request: NewColumn) -> BoardServiceResult<Column> {
        self.mutate(|board, _| board.add_column(&request)).await
    }

    /// Edits a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the column is unknown, the patch is
    /// invalid, or the snapshot cannot be saved.
    pub async fn update_column(
        &self,
        id: ColumnId,
        patch: ColumnPatch,
    ) -> BoardServiceResult<Column> {
        self.mutate(|board, _| board.update_column(id, &patch)).await
    }

    /// Deletes a column according to the given acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the column is unknown, still holds
    /// tasks under [`ColumnDeletion::RequireEmpty`], or the snapshot cannot
    /// be saved.
    pub async fn delete_column(
        &self,
        id: ColumnId,
        deletion: ColumnDeletion,
    ) -> BoardServiceResult<DeletedColumn> {
        self.mutate(|board, _| board.delete_column(id, deletion))
            .await
    }

    /// Replaces the column order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the order is not a permutation of
    /// the current columns or the snapshot cannot be saved.
    pub async fn reorder_columns(&self, order: Vec<ColumnId>) -> BoardServiceResult<()> {
        self.mutate(|board, _| board.reorder_columns(&order)).await
    }

    /// Designates the column that receives new personal and restored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the column is unknown or the
    /// snapshot cannot be saved.
    pub async fn set_default_column(&self, id: Option<ColumnId>) -> BoardServiceResult<()> {
        self.mutate(|board, _| board.set_default_column(id)).await
    }

    /// Designates the column that receives newly synchronized tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the column is unknown or the
    /// snapshot cannot be saved.
    pub async fn set_inbox_column(&self, id: Option<ColumnId>) -> BoardServiceResult<()> {
        self.mutate(|board, _| board.set_inbox_column(id)).await
    }

    /// Archives an active task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the task is not active or the
    /// snapshot cannot be saved.
    pub async fn archive_task(&self, id: TaskId) -> BoardServiceResult<Task> {
        self.mutate(|board, clock| board.archive_task(id, clock))
            .await
    }

    /// Restores an archived task to the default column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the task is not archived, the board
    /// has no columns, or the snapshot cannot be saved.
    pub async fn restore_task(&self, id: TaskId) -> BoardServiceResult<Task> {
        self.mutate(|board, _| board.restore_task(id)).await
    }

    /// Permanently deletes an archived task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the task is not archived or the
    /// snapshot cannot be saved.
    pub async fn delete_archived_task(&self, id: TaskId) -> BoardServiceResult<Task> {
        self.mutate(|board, _| board.delete_archived_task(id)).await
    }

    /// Permanently deletes every archived task and returns how many went.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the snapshot cannot be saved.
    pub async fn clear_archive(&self) -> BoardServiceResult<usize> {
        self.mutate(|board, _| Ok(board.clear_archive())).await
    }

    /// Reconciles the board with a batch of tracker candidates.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the snapshot cannot be saved.
    pub async fn run_sync(&self, candidates: &[TrackerCandidate]) -> BoardServiceResult<SyncSummary> {
        self.mutate(|board, clock| Ok(board.apply_sync(candidates, clock)))
            .await
    }

    /// Fetches candidates from `source` and reconciles the board with them.
    ///
    /// A fetch failure counts as an empty batch and leaves the board as is.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the snapshot cannot be saved.
    pub async fn sync_from(&self, source: &impl TrackerSource) -> BoardServiceResult<SyncSummary> {
        match source.fetch_candidates().await {
            Ok(candidates) => self.run_sync(&candidates).await,
            Err(err) => {
                tracing::warn!(error = %err, "tracker fetch failed, skipping sync round");
                Ok(SyncSummary::default())
            }
        }
    }

    /// Applies one operation to many tasks, collecting per-id failures.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the snapshot cannot be saved.
    pub async fn bulk_apply(
        &self,
        ids: &[TaskId],
        operation: BulkOperation,
    ) -> BoardServiceResult<BulkOutcome> {
        self.mutate(|board, clock| Ok(board.bulk_apply(ids, operation, clock)))
            .await
    }

    async fn mutate<T, F>(&self, apply: F) -> BoardServiceResult<T>
    where
        F: FnOnce(&mut Board, &C) -> Result<T, BoardDomainError>,
    {
        let mut board = self.board.lock().await;
        let mut draft = board.clone();
        let value = apply(&mut draft, self.clock.as_ref())?;
        if draft != *board {
            self.store.save(&BoardSnapshot::capture(&draft)).await?;
            tracing::info!("board snapshot saved");
            *board = draft;
        }
        Ok(value)
    }
}
