//! Task creation, editing, deletion and external-reference lookup.

use super::{Board, BoardDomainError, ExternalKey, NewTask, Task, TaskId, TaskPatch};
use mockable::Clock;

impl Board {
    /// Creates a personal task at the end of the requested column, or of the
    /// default column when none is requested.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] for a blank title,
    /// [`BoardDomainError::ColumnNotFound`] for an unknown requested column,
    /// or [`BoardDomainError::NoColumns`] when the board has no columns.
    pub fn create_task(
        &mut self,
        request: &NewTask,
        clock: &impl Clock,
    ) -> Result<Task, BoardDomainError> {
        let task = Task::new_personal(request, clock)?;
        let column_id = match request.column() {
            Some(id) => id,
            None => self.default_column_id().ok_or(BoardDomainError::NoColumns)?,
        };
        self.column_mut(column_id)?.push(task.id());
        self.tasks.insert(task.id(), task.clone());
        tracing::debug!(task_id = %task.id(), column_id = %column_id, "task created");
        Ok(task)
    }

    /// Applies a partial edit to an active task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not active,
    /// or [`BoardDomainError::EmptyTaskTitle`] for a blank replacement title.
    pub fn update_task(
        &mut self,
        id: TaskId,
        patch: &TaskPatch,
        clock: &impl Clock,
    ) -> Result<Task, BoardDomainError> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(BoardDomainError::TaskNotFound(id))?;
        task.apply_patch(patch, clock)?;
        tracing::debug!(task_id = %id, "task updated");
        Ok(task.clone())
    }

    /// Permanently deletes an active task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not active.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, BoardDomainError> {
        let task = self
            .tasks
            .remove(&id)
            .ok_or(BoardDomainError::TaskNotFound(id))?;
        self.detach(id);
        tracing::debug!(task_id = %id, "task deleted");
        Ok(task)
    }

    /// Finds an active or archived task by its external tracker key.
    #[must_use]
    pub fn find_by_external_ref(&self, key: &ExternalKey) -> Option<&Task> {
        self.tasks
            .values()
            .chain(self.archived_tasks.values())
            .find(|task| {
                task.external_ref()
                    .is_some_and(|external| external.key() == key)
            })
    }

    pub(crate) fn find_id_by_external_ref(&self, key: &ExternalKey) -> Option<TaskId> {
        self.find_by_external_ref(key).map(Task::id)
    }
}
