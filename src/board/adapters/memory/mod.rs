//! In-memory adapters for tests and embedding.

mod snapshot;
mod tracker;

pub use snapshot::InMemorySnapshotStore;
pub use tracker::InMemoryTrackerSource;
