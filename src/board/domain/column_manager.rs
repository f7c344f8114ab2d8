//! Column lifecycle and task ordering.

use super::{Board, BoardDomainError, Column, ColumnId, ColumnPatch, NewColumn, Task, TaskId};
use std::collections::HashSet;

/// Acknowledgement required to delete a column.
///
/// Deleting a column discards the tasks it holds; they are not archived.
/// Callers that want to keep them archive them first and then delete with
/// [`ColumnDeletion::RequireEmpty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnDeletion {
    /// Fail with [`BoardDomainError::ColumnNotEmpty`] if the column holds tasks.
    RequireEmpty,
    /// Permanently delete the column's tasks together with the column.
    DiscardTasks,
}

/// Result of deleting a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedColumn {
    /// The removed column, as it was before deletion.
    pub column: Column,
    /// Tasks that were permanently deleted with it, in column order.
    pub discarded_tasks: Vec<Task>,
}

/// Intended reorder: move a task from one column to a position in another
/// (or the same) column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTask {
    /// Task to move.
    pub task_id: TaskId,
    /// Column currently holding the task.
    pub from: ColumnId,
    /// Destination column.
    pub to: ColumnId,
    /// Destination index, interpreted after the task has been removed from
    /// its source position.
    pub index: usize,
}

impl MoveTask {
    /// Creates a move request.
    #[must_use]
    pub const fn new(task_id: TaskId, from: ColumnId, to: ColumnId, index: usize) -> Self {
        Self {
            task_id,
            from,
            to,
            index,
        }
    }
}

/// Result of a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Column now holding the task.
    pub column_id: ColumnId,
    /// Index the task was placed at after clamping.
    pub index: usize,
    /// The destination column now exceeds its WIP limit.
    pub over_limit: bool,
}

impl Board {
    /// Appends a new column to the column order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnLimitExceeded`] when the board is
    /// full, or [`BoardDomainError::EmptyColumnTitle`] for a blank title.
    pub fn add_column(&mut self, request: &NewColumn) -> Result<Column, BoardDomainError> {
        let max = self.config.max_columns;
        if self.column_order.len() >= max {
            return Err(BoardDomainError::ColumnLimitExceeded { max });
        }
        let column = Column::new(request)?;
        self.column_order.push(column.id());
        self.columns.insert(column.id(), column.clone());
        tracing::debug!(column_id = %column.id(), title = column.title(), "column added");
        Ok(column)
    }

    /// Updates a column's title, color or WIP limit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for an unknown column or
    /// [`BoardDomainError::EmptyColumnTitle`] for a blank replacement title.
    pub fn update_column(
        &mut self,
        id: ColumnId,
        patch: &ColumnPatch,
    ) -> Result<Column, BoardDomainError> {
        let column = self.column_mut(id)?;
        column.apply_patch(patch)?;
        Ok(column.clone())
    }

    /// Deletes a column. With [`ColumnDeletion::DiscardTasks`] every task in
    /// the column is permanently removed from the board, not archived.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for an unknown column or
    /// [`BoardDomainError::ColumnNotEmpty`] when the acknowledgement requires
    /// an empty column.
    pub fn delete_column(
        &mut self,
        id: ColumnId,
        deletion: ColumnDeletion,
    ) -> Result<DeletedColumn, BoardDomainError> {
        let column = self
            .columns
            .get(&id)
            .ok_or(BoardDomainError::ColumnNotFound(id))?;
        if deletion == ColumnDeletion::RequireEmpty && !column.is_empty() {
            return Err(BoardDomainError::ColumnNotEmpty {
                id,
                count: column.len(),
            });
        }

        let column = self
            .columns
            .remove(&id)
            .ok_or(BoardDomainError::ColumnNotFound(id))?;
        self.column_order.retain(|column_id| *column_id != id);
        if self.default_column == Some(id) {
            self.default_column = None;
        }
        if self.inbox_column == Some(id) {
            self.inbox_column = None;
        }

        let discarded_tasks: Vec<Task> = column
            .task_ids()
            .iter()
            .filter_map(|task_id| self.tasks.remove(task_id))
            .collect();
        if !discarded_tasks.is_empty() {
            tracing::warn!(
                column_id = %id,
                discarded = discarded_tasks.len(),
                "column deleted together with its tasks"
            );
        }
        Ok(DeletedColumn {
            column,
            discarded_tasks,
        })
    }

    /// Replaces the column order wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColumnOrder`] unless `new_order` is
    /// a permutation of the current column ids.
    pub fn reorder_columns(&mut self, new_order: &[ColumnId]) -> Result<(), BoardDomainError> {
        let unique: HashSet<ColumnId> = new_order.iter().copied().collect();
        let is_permutation = new_order.len() == self.column_order.len()
            && unique.len() == new_order.len()
            && unique.iter().all(|id| self.columns.contains_key(id));
        if !is_permutation {
            return Err(BoardDomainError::InvalidColumnOrder);
        }
        self.column_order = new_order.to_vec();
        Ok(())
    }

    /// Moves a task within or across columns.
    ///
    /// The task is removed from its source position first and then inserted
    /// at `index` clamped to the destination's length after removal, so a
    /// move to a later position in the same column lands exactly at `index`.
    /// Exceeding the destination's WIP limit is reported in the outcome, not
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] for an inactive task,
    /// [`BoardDomainError::ColumnNotFound`] for an unknown column, or
    /// [`BoardDomainError::TaskNotInColumn`] when the task is not in `from`.
    pub fn move_task(&mut self, request: MoveTask) -> Result<MoveOutcome, BoardDomainError> {
        let MoveTask {
            task_id,
            from,
            to,
            index,
        } = request;
        if !self.tasks.contains_key(&task_id) {
            return Err(BoardDomainError::TaskNotFound(task_id));
        }
        if !self.columns.contains_key(&to) {
            return Err(BoardDomainError::ColumnNotFound(to));
        }
        self.column_mut(from)?
            .remove(task_id)
            .ok_or(BoardDomainError::TaskNotInColumn {
                task: task_id,
                column: from,
            })?;

        let destination = self.column_mut(to)?;
        let placed_at = destination.insert_clamped(index, task_id);
        let over_limit = destination.is_over_limit();
        if over_limit {
            tracing::warn!(
                task_id = %task_id,
                column_id = %to,
                count = destination.len(),
                "column exceeds its WIP limit"
            );
        }
        Ok(MoveOutcome {
            column_id: to,
            index: placed_at,
            over_limit,
        })
    }

    /// Appends an active task to the end of a column, detaching it first.
    pub(crate) fn move_to_end(
        &mut self,
        task_id: TaskId,
        to: ColumnId,
    ) -> Result<MoveOutcome, BoardDomainError> {
        let from = self
            .column_of(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        self.move_task(MoveTask::new(task_id, from, to, usize::MAX))
    }
}
