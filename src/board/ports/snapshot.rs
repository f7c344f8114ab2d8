//! Snapshot persistence port for the board.
//!
//! The whole board is the unit of durable storage: it is saved after every
//! successful mutation and loaded wholesale at startup.

use crate::board::domain::{Board, BoardConfig, InvariantViolation};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Snapshot format version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Result type for snapshot store operations.
pub type SnapshotStoreResult<T> = Result<T, SnapshotStoreError>;

/// Versioned, serializable copy of the full board state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    version: u32,
    board: Board,
}

impl BoardSnapshot {
    /// Captures the current board state.
    #[must_use]
    pub fn capture(board: &Board) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            board: board.clone(),
        }
    }

    /// Returns the snapshot format version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Serializes the snapshot to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> SnapshotStoreResult<String> {
        serde_json::to_string_pretty(self).map_err(SnapshotStoreError::serialization)
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Serialization`] if decoding fails.
    pub fn from_json(document: &str) -> SnapshotStoreResult<Self> {
        serde_json::from_str(document).map_err(SnapshotStoreError::serialization)
    }

    /// Validates the snapshot and turns it into a live board.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::UnsupportedVersion`] for an unknown
    /// format version, or [`SnapshotStoreError::Corrupt`] when the stored
    /// board breaks a structural invariant.
    pub fn into_board(self, config: BoardConfig) -> SnapshotStoreResult<Board> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotStoreError::UnsupportedVersion(self.version));
        }
        let mut board = self.board;
        board.check_invariants()?;
        board.set_config(config);
        Ok(board)
    }
}

/// Board snapshot persistence contract.
#[async_trait]
pub trait BoardSnapshotStore: Send + Sync {
    /// Loads the stored snapshot.
    ///
    /// Returns `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError`] when the stored data cannot be read or
    /// decoded.
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError`] when the snapshot cannot be encoded or
    /// written. A failed save must leave the previous snapshot intact.
    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()>;
}

/// Errors returned by snapshot store implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotStoreError {
    /// The snapshot was written by an unknown format version.
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    /// The stored board breaks a structural invariant.
    #[error("corrupt board snapshot: {0}")]
    Corrupt(#[from] InvariantViolation),

    /// Encoding or decoding failed.
    #[error("snapshot serialization error: {0}")]
    Serialization(Arc<serde_json::Error>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotStoreError {
    /// Wraps a serialization error.
    #[must_use]
    pub fn serialization(err: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
