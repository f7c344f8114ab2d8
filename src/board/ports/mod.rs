//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by the board service.

pub mod snapshot;
pub mod tracker;

pub use snapshot::{
    BoardSnapshot, BoardSnapshotStore, SNAPSHOT_VERSION, SnapshotStoreError, SnapshotStoreResult,
};
pub use tracker::{TrackerError, TrackerSource};
