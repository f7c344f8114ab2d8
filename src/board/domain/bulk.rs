//! One logical operation applied across a selection of tasks.

use super::{Board, BoardDomainError, ColumnId, Priority, TaskId};
use mockable::Clock;
use std::collections::HashSet;

/// Operation applied by [`Board::bulk_apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOperation {
    /// Archive each active task.
    Archive,
    /// Permanently delete each task, active or archived.
    Delete,
    /// Append each active task to the end of a column.
    MoveTo(ColumnId),
    /// Set the priority of each active task.
    SetPriority(Priority),
}

/// A task the bulk operation could not be applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    /// Task id from the selection.
    pub id: TaskId,
    /// Why the operation failed for this id.
    pub reason: BoardDomainError,
}

/// Per-id outcome of a bulk operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Ids the operation was applied to, in selection order.
    pub succeeded: Vec<TaskId>,
    /// Ids the operation failed for, in selection order.
    pub failed: Vec<BulkFailure>,
    /// Columns pushed over their WIP limit by a [`BulkOperation::MoveTo`].
    pub over_limit: Vec<ColumnId>,
}

impl BulkOutcome {
    /// Returns `true` when every selected id succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Board {
    /// Applies one operation to every selected task independently.
    ///
    /// A failure on one id is recorded and does not stop the remaining ids.
    /// Repeated ids are processed once, at their first occurrence.
    pub fn bulk_apply(
        &mut self,
        ids: &[TaskId],
        operation: BulkOperation,
        clock: &impl Clock,
    ) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        let mut seen = HashSet::new();
        for id in ids.iter().copied().filter(|id| seen.insert(*id)) {
            match self.apply_one(id, operation, clock) {
                Ok(over_limit) => {
                    outcome.succeeded.push(id);
                    if let Some(column_id) = over_limit
                        && !outcome.over_limit.contains(&column_id)
                    {
                        outcome.over_limit.push(column_id);
                    }
                }
                Err(reason) => outcome.failed.push(BulkFailure { id, reason }),
            }
        }
        tracing::info!(
            ?operation,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "bulk operation applied"
        );
        outcome
    }

    /// Applies the operation to one id; returns a column pushed over its limit.
    fn apply_one(
        &mut self,
        id: TaskId,
        operation: BulkOperation,
        clock: &impl Clock,
    ) -> Result<Option<ColumnId>, BoardDomainError> {
        match operation {
            BulkOperation::Archive => self.archive_task(id, clock).map(|_| None),
            BulkOperation::Delete => {
                if self.archived_tasks.contains_key(&id) {
                    self.delete_archived_task(id).map(|_| None)
                } else {
                    self.delete_task(id).map(|_| None)
                }
            }
            BulkOperation::MoveTo(column_id) => {
                let outcome = self.move_to_end(id, column_id)?;
                Ok(outcome.over_limit.then_some(outcome.column_id))
            }
            BulkOperation::SetPriority(priority) => {
                let task = self
                    .tasks
                    .get_mut(&id)
                    .ok_or(BoardDomainError::TaskNotFound(id))?;
                task.set_priority(priority, clock);
                Ok(None)
            }
        }
    }
}
