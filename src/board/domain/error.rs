//! Error types for board domain validation and mutation.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Broad category of a [`BoardDomainError`].
///
/// Presentation layers use the kind to decide how to surface a failure
/// without matching on every concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardErrorKind {
    /// Malformed input such as an empty title.
    Validation,
    /// The operation referenced an id absent from the expected set.
    NotFound,
    /// Structurally invalid parameters.
    InvalidArgument,
    /// A hard board ceiling would be exceeded.
    LimitExceeded,
}

/// Errors returned while validating or mutating the board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The column title is empty after trimming.
    #[error("column title must not be empty")]
    EmptyColumnTitle,

    /// The external tracker reference is empty after trimming.
    #[error("external reference must not be empty")]
    EmptyExternalRef,

    /// The WIP limit is not a positive integer.
    #[error("invalid WIP limit {0}, expected a positive integer")]
    InvalidWipLimit(u32),

    /// The task is not on the active board.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task is not in the archive.
    #[error("archived task not found: {0}")]
    ArchivedTaskNotFound(TaskId),

    /// The column does not exist.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The board has no column to place a task in.
    #[error("board has no columns")]
    NoColumns,

    /// The task is not currently placed in the named source column.
    #[error("task {task} is not in column {column}")]
    TaskNotInColumn {
        /// Task that was expected in the column.
        task: TaskId,
        /// Column that was expected to hold the task.
        column: ColumnId,
    },

    /// A column reorder was not a permutation of the existing column ids.
    #[error("column order must be a permutation of the existing column ids")]
    InvalidColumnOrder,

    /// A column deletion that requires an empty column found tasks in it.
    #[error("column {id} still holds {count} tasks")]
    ColumnNotEmpty {
        /// Column that was asked to be deleted.
        id: ColumnId,
        /// Number of active tasks that would have been discarded.
        count: usize,
    },

    /// The board already holds the maximum number of columns.
    #[error("board already holds the maximum of {max} columns")]
    ColumnLimitExceeded {
        /// Configured column ceiling.
        max: usize,
    },
}

impl BoardDomainError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        match self {
            Self::EmptyTaskTitle
            | Self::EmptyColumnTitle
            | Self::EmptyExternalRef
            | Self::InvalidWipLimit(_) => BoardErrorKind::Validation,
            Self::TaskNotFound(_)
            | Self::ArchivedTaskNotFound(_)
            | Self::ColumnNotFound(_)
            | Self::NoColumns => BoardErrorKind::NotFound,
            Self::TaskNotInColumn { .. }
            | Self::InvalidColumnOrder
            | Self::ColumnNotEmpty { .. } => BoardErrorKind::InvalidArgument,
            Self::ColumnLimitExceeded { .. } => BoardErrorKind::LimitExceeded,
        }
    }
}

/// Error returned while parsing task priorities or origins from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field}: {value}")]
pub struct ParseBoardValueError {
    /// Name of the field being parsed.
    pub field: &'static str,
    /// Raw value that failed to parse.
    pub value: String,
}
