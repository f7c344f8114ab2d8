//! Moving tasks between the active board and the archive.

use super::{Board, BoardDomainError, Task, TaskId};
use mockable::Clock;

impl Board {
    /// Moves an active task into the archive.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not active.
    pub fn archive_task(&mut self, id: TaskId, clock: &impl Clock) -> Result<Task, BoardDomainError> {
        let mut task = self
            .tasks
            .remove(&id)
            .ok_or(BoardDomainError::TaskNotFound(id))?;
        self.detach(id);
        task.mark_archived(clock);
        self.archived_tasks.insert(id, task.clone());
        tracing::debug!(task_id = %id, "task archived");
        Ok(task)
    }

    /// Restores an archived task to the end of the default column.
    ///
    /// The column the task was archived from is not remembered.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ArchivedTaskNotFound`] when the task is not
    /// archived, or [`BoardDomainError::NoColumns`] when there is no column
    /// to restore into.
    pub fn restore_task(&mut self, id: TaskId) -> Result<Task, BoardDomainError> {
        if !self.archived_tasks.contains_key(&id) {
            return Err(BoardDomainError::ArchivedTaskNotFound(id));
        }
        let column_id = self.default_column_id().ok_or(BoardDomainError::NoColumns)?;
        let mut task = self
            .archived_tasks
            .remove(&id)
            .ok_or(BoardDomainError::ArchivedTaskNotFound(id))?;
        task.clear_archived();
        self.column_mut(column_id)?.push(id);
        self.tasks.insert(id, task.clone());
        tracing::debug!(task_id = %id, column_id = %column_id, "task restored");
        Ok(task)
    }

    /// Permanently deletes an archived task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ArchivedTaskNotFound`] when the task is not
    /// archived.
    pub fn delete_archived_task(&mut self, id: TaskId) -> Result<Task, BoardDomainError> {
        let task = self
            .archived_tasks
            .remove(&id)
            .ok_or(BoardDomainError::ArchivedTaskNotFound(id))?;
        tracing::debug!(task_id = %id, "archived task deleted");
        Ok(task)
    }

    /// Permanently deletes every archived task. Returns how many were removed.
    pub fn clear_archive(&mut self) -> usize {
        let removed = self.archived_tasks.len();
        self.archived_tasks.clear();
        tracing::debug!(removed, "archive cleared");
        removed
    }
}
