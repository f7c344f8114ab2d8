//! Domain model for the task board.
//!
//! The [`Board`] aggregate owns columns, active tasks and archived tasks.
//! Its behaviour is split by concern: task store operations, column
//! management and ordering, archival, tracker synchronization, bulk
//! operations, filtered views and column suggestions. No infrastructure
//! concerns cross this boundary; time comes from an injected clock.

mod archive;
mod board;
mod bulk;
mod column;
mod column_manager;
mod config;
mod error;
mod filter;
mod ids;
mod invariants;
mod suggestion;
mod sync;
mod task;
mod task_store;

pub use board::Board;
pub use bulk::{BulkFailure, BulkOperation, BulkOutcome};
pub use column::{Column, ColumnPatch, NewColumn, WipLimit};
pub use column_manager::{ColumnDeletion, DeletedColumn, MoveOutcome, MoveTask};
pub use config::{BoardConfig, DEFAULT_MAX_COLUMNS, InitialColumn, SuggestionConfig};
pub use error::{BoardDomainError, BoardErrorKind, ParseBoardValueError};
pub use filter::{FilteredTasks, TaskFilter};
pub use ids::{ColumnId, ExternalKey, TaskId};
pub use invariants::InvariantViolation;
pub use suggestion::{ColumnSuggestion, suggest_columns};
pub use sync::SyncSummary;
pub use task::{
    ExternalRef, NewTask, Priority, Task, TaskOrigin, TaskPatch, TrackerCandidate,
    TrackerItemKind, ValidCandidate,
};
