//! Read-only filtered views over active tasks.

use super::{Board, Column, Priority, Task, TaskOrigin};

/// Query over active tasks. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    text: Option<String>,
    priority: Option<Priority>,
    origin: Option<TaskOrigin>,
    label: Option<String>,
}

impl TaskFilter {
    /// Creates a filter that matches every active task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches tasks whose title or description contains `text`, ignoring case.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let value = text.into();
        let normalized = value.trim();
        self.text = (!normalized.is_empty()).then(|| normalized.to_lowercase());
        self
    }

    /// Matches tasks with exactly this priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Matches tasks with exactly this origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: TaskOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Matches tasks carrying this label, ignoring case.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let value = label.into();
        let normalized = value.trim();
        self.label = (!normalized.is_empty()).then(|| normalized.to_lowercase());
        self
    }

    /// Returns `true` when the task satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.priority.is_none_or(|priority| task.priority() == priority)
            && self.origin.is_none_or(|origin| task.origin() == origin)
            && self.label.as_deref().is_none_or(|label| {
                task.labels()
                    .iter()
                    .any(|candidate| candidate.to_lowercase() == label)
            })
            && self.text.as_deref().is_none_or(|text| {
                task.title().to_lowercase().contains(text)
                    || task
                        .description()
                        .is_some_and(|description| description.to_lowercase().contains(text))
            })
    }
}

/// Lazy iterator over active tasks matching a [`TaskFilter`].
///
/// Tasks come in column order, then each column's own order. The iterator
/// borrows the board, so it always reflects the state it was created from;
/// clone it to restart.
#[derive(Debug, Clone)]
pub struct FilteredTasks<'a> {
    board: &'a Board,
    filter: &'a TaskFilter,
    column_index: usize,
    task_index: usize,
}

impl<'a> Iterator for FilteredTasks<'a> {
    type Item = &'a Task;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let column = self.current_column()?;
            let Some(task_id) = column.task_ids().get(self.task_index) else {
                self.column_index += 1;
                self.task_index = 0;
                continue;
            };
            self.task_index += 1;
            if let Some(task) = self.board.task(*task_id)
                && self.filter.matches(task)
            {
                return Some(task);
            }
        }
    }
}

impl<'a> FilteredTasks<'a> {
    fn current_column(&self) -> Option<&'a Column> {
        let id = self.board.column_order().get(self.column_index)?;
        self.board.column(*id)
    }
}

impl Board {
    /// Returns a lazy view of the active tasks matching `filter`.
    #[must_use]
    pub const fn query<'a>(&'a self, filter: &'a TaskFilter) -> FilteredTasks<'a> {
        FilteredTasks {
            board: self,
            filter,
            column_index: 0,
            task_index: 0,
        }
    }
}
