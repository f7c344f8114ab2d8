//! In-memory snapshot store.
//!
//! Snapshots are kept as encoded JSON so every save and load exercises the
//! same serialization path as durable stores.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::ports::{
    BoardSnapshot, BoardSnapshotStore, SnapshotStoreError, SnapshotStoreResult,
};

/// Thread-safe in-memory snapshot store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    state: Arc<RwLock<InMemorySnapshotState>>,
}

#[derive(Debug, Default)]
struct InMemorySnapshotState {
    document: Option<String>,
    saves: usize,
}

impl InMemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with an encoded snapshot document.
    #[must_use]
    pub fn with_document(document: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut state) = store.state.write() {
            state.document = Some(document.into());
        }
        store
    }

    /// Returns how many snapshots have been saved.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] if the lock is poisoned.
    pub fn save_count(&self) -> SnapshotStoreResult<usize> {
        let state = self.state.read().map_err(|err| {
            SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.saves)
    }

    /// Returns the stored document, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] if the lock is poisoned.
    pub fn document(&self) -> SnapshotStoreResult<Option<String>> {
        let state = self.state.read().map_err(|err| {
            SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.document.clone())
    }
}

#[async_trait]
impl BoardSnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>> {
        self.document()?
            .as_deref()
            .map(BoardSnapshot::from_json)
            .transpose()
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()> {
        let document = snapshot.to_json()?;
        let mut state = self.state.write().map_err(|err| {
            SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.document = Some(document);
        state.saves += 1;
        Ok(())
    }
}
