//! Board aggregate root.

use super::{BoardConfig, BoardDomainError, Column, ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate of ordered columns, active tasks and archived tasks.
///
/// All mutation goes through the methods defined across the domain modules
/// (task store, column manager, archive, sync and bulk operations), each of
/// which leaves the board satisfying [`Board::check_invariants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) column_order: Vec<ColumnId>,
    pub(crate) columns: HashMap<ColumnId, Column>,
    pub(crate) tasks: HashMap<TaskId, Task>,
    pub(crate) archived_tasks: HashMap<TaskId, Task>,
    #[serde(default)]
    pub(crate) default_column: Option<ColumnId>,
    #[serde(default)]
    pub(crate) inbox_column: Option<ColumnId>,
    #[serde(skip)]
    pub(crate) config: BoardConfig,
}

impl Board {
    /// Creates an empty board with no columns.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            column_order: Vec::new(),
            columns: HashMap::new(),
            tasks: HashMap::new(),
            archived_tasks: HashMap::new(),
            default_column: None,
            inbox_column: None,
            config,
        }
    }

    /// Creates a board holding the configured initial columns.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardDomainError`] when an initial column is invalid or
    /// there are more initial columns than the configured maximum.
    pub fn seeded(config: BoardConfig) -> Result<Self, BoardDomainError> {
        let seeds: Vec<_> = config
            .initial_columns
            .iter()
            .map(super::InitialColumn::to_request)
            .collect();
        let mut board = Self::new(config);
        for request in &seeds {
            board.add_column(request)?;
        }
        Ok(board)
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Replaces the configuration, e.g. after loading a snapshot.
    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
    }

    /// Returns column ids in display order.
    #[must_use]
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// Returns a column by id.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(&id)
    }

    /// Iterates columns in display order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.column_order
            .iter()
            .filter_map(|id| self.columns.get(id))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    /// Finds the first column whose title matches, ignoring case.
    #[must_use]
    pub fn find_column_by_title(&self, title: &str) -> Option<&Column> {
        let wanted = title.trim();
        self.columns()
            .find(|column| column.title().eq_ignore_ascii_case(wanted))
    }

    /// Returns an active task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Iterates active tasks in board order: columns left to right, then
    /// each column's own order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.columns()
            .flat_map(|column| column.task_ids().iter())
            .filter_map(|id| self.tasks.get(id))
    }

    /// Returns the number of active tasks.
    #[must_use]
    pub fn active_task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns an archived task by id.
    #[must_use]
    pub fn archived_task(&self, id: TaskId) -> Option<&Task> {
        self.archived_tasks.get(&id)
    }

    /// Returns archived tasks, most recently archived first.
    #[must_use]
    pub fn archived_tasks(&self) -> Vec<&Task> {
        let mut archived: Vec<&Task> = self.archived_tasks.values().collect();
        archived.sort_by(|left, right| {
            right
                .archived_at()
                .cmp(&left.archived_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        archived
    }

    /// Returns the number of archived tasks.
    #[must_use]
    pub fn archive_len(&self) -> usize {
        self.archived_tasks.len()
    }

    /// Returns the column currently holding an active task.
    #[must_use]
    pub fn column_of(&self, task_id: TaskId) -> Option<ColumnId> {
        self.columns()
            .find(|column| column.position_of(task_id).is_some())
            .map(Column::id)
    }

    /// Returns the column new and restored tasks land in: the configured
    /// default column if it exists, else the first column.
    #[must_use]
    pub fn default_column_id(&self) -> Option<ColumnId> {
        self.default_column
            .filter(|id| self.columns.contains_key(id))
            .or_else(|| self.column_order.first().copied())
    }

    /// Returns the column synchronized tasks land in: the configured inbox
    /// column if it exists, else the default column.
    #[must_use]
    pub fn inbox_column_id(&self) -> Option<ColumnId> {
        self.inbox_column
            .filter(|id| self.columns.contains_key(id))
            .or_else(|| self.default_column_id())
    }

    /// Designates the default column. `None` falls back to the first column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for an unknown column.
    pub fn set_default_column(&mut self, id: Option<ColumnId>) -> Result<(), BoardDomainError> {
        self.default_column = self.checked_column(id)?;
        Ok(())
    }

    /// Designates the inbox column. `None` falls back to the default column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for an unknown column.
    pub fn set_inbox_column(&mut self, id: Option<ColumnId>) -> Result<(), BoardDomainError> {
        self.inbox_column = self.checked_column(id)?;
        Ok(())
    }

    fn checked_column(&self, id: Option<ColumnId>) -> Result<Option<ColumnId>, BoardDomainError> {
        match id {
            Some(column_id) if !self.columns.contains_key(&column_id) => {
                Err(BoardDomainError::ColumnNotFound(column_id))
            }
            other => Ok(other),
        }
    }

    pub(crate) fn column_mut(&mut self, id: ColumnId) -> Result<&mut Column, BoardDomainError> {
        self.columns
            .get_mut(&id)
            .ok_or(BoardDomainError::ColumnNotFound(id))
    }

    /// Removes a task id from whichever column holds it.
    pub(crate) fn detach(&mut self, task_id: TaskId) -> Option<ColumnId> {
        self.columns
            .values_mut()
            .find_map(|column| column.remove(task_id).map(|_| column.id()))
    }
}
