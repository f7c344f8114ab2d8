//! Structural consistency checks for the board aggregate.

use super::{Board, ColumnId, ExternalKey, TaskId};
use std::collections::HashSet;
use thiserror::Error;

/// A broken structural invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A column references a task id that is not active.
    #[error("column {column} references task {task} which is not active")]
    DanglingTaskId {
        /// Column holding the reference.
        column: ColumnId,
        /// Referenced task id.
        task: TaskId,
    },

    /// An active task is referenced more than once across all columns.
    #[error("task {0} is placed more than once")]
    TaskPlacedTwice(TaskId),

    /// An active task is not referenced by any column.
    #[error("task {0} is not placed in any column")]
    UnplacedTask(TaskId),

    /// A task is both active and archived.
    #[error("task {0} is both active and archived")]
    ArchiveOverlap(TaskId),

    /// The column order is not a permutation of the column ids.
    #[error("column order does not match the set of columns")]
    ColumnOrderMismatch,

    /// Two tasks share an external tracker key.
    #[error("external reference {0} is used by more than one task")]
    DuplicateExternalRef(ExternalKey),

    /// A task's archive timestamp disagrees with where it is stored.
    #[error("task {0} has an archive timestamp inconsistent with its location")]
    ArchiveStateMismatch(TaskId),

    /// A task's external reference disagrees with its origin.
    #[error("task {0} has an external reference inconsistent with its origin")]
    OriginMismatch(TaskId),

    /// A map key differs from the id stored in the entity.
    #[error("entry stored under {0} carries a different id")]
    KeyMismatch(String),

    /// The designated default or inbox column does not exist.
    #[error("designated column {0} does not exist")]
    MissingDesignatedColumn(ColumnId),
}

impl Board {
    /// Verifies every structural invariant, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.check_column_order()?;
        self.check_placement()?;
        self.check_task_records()?;
        self.check_external_refs()
    }

    fn check_column_order(&self) -> Result<(), InvariantViolation> {
        let ordered: HashSet<ColumnId> = self.column_order.iter().copied().collect();
        let is_permutation = ordered.len() == self.column_order.len()
            && ordered.len() == self.columns.len()
            && ordered.iter().all(|id| self.columns.contains_key(id));
        if !is_permutation {
            return Err(InvariantViolation::ColumnOrderMismatch);
        }
        if let Some((key, _)) = self.columns.iter().find(|(key, column)| **key != column.id()) {
            return Err(InvariantViolation::KeyMismatch(key.to_string()));
        }
        for designated in [self.default_column, self.inbox_column].into_iter().flatten() {
            if !self.columns.contains_key(&designated) {
                return Err(InvariantViolation::MissingDesignatedColumn(designated));
            }
        }
        Ok(())
    }

    fn check_placement(&self) -> Result<(), InvariantViolation> {
        let mut placed = HashSet::new();
        for column in self.columns() {
            for task_id in column.task_ids() {
                if !self.tasks.contains_key(task_id) {
                    return Err(InvariantViolation::DanglingTaskId {
                        column: column.id(),
                        task: *task_id,
                    });
                }
                if !placed.insert(*task_id) {
                    return Err(InvariantViolation::TaskPlacedTwice(*task_id));
                }
            }
        }
        match self.tasks.keys().find(|id| !placed.contains(*id)) {
            Some(unplaced) => Err(InvariantViolation::UnplacedTask(*unplaced)),
            None => Ok(()),
        }
    }

    fn check_task_records(&self) -> Result<(), InvariantViolation> {
        if let Some(id) = self.tasks.keys().find(|id| self.archived_tasks.contains_key(*id)) {
            return Err(InvariantViolation::ArchiveOverlap(*id));
        }
        let stores = [(&self.tasks, false), (&self.archived_tasks, true)];
        for (store, archived) in stores {
            for (key, task) in store {
                if *key != task.id() {
                    return Err(InvariantViolation::KeyMismatch(key.to_string()));
                }
                if task.is_archived() != archived {
                    return Err(InvariantViolation::ArchiveStateMismatch(*key));
                }
                if task.origin().is_tracked() != task.external_ref().is_some() {
                    return Err(InvariantViolation::OriginMismatch(*key));
                }
            }
        }
        Ok(())
    }

    fn check_external_refs(&self) -> Result<(), InvariantViolation> {
        let mut seen: HashSet<&ExternalKey> = HashSet::new();
        let keys = self
            .tasks
            .values()
            .chain(self.archived_tasks.values())
            .filter_map(|task| task.external_ref().map(super::ExternalRef::key));
        for key in keys {
            if !seen.insert(key) {
                return Err(InvariantViolation::DuplicateExternalRef(key.clone()));
            }
        }
        Ok(())
    }
}
