//! Filesystem snapshot store using capability-based directory access.
//!
//! Saves write the encoded snapshot to a sibling temporary file, flush it to
//! disk, rename it over the previous snapshot and then flush the directory, so
//! a crash mid-save leaves the old snapshot readable.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use crate::board::ports::{
    BoardSnapshot, BoardSnapshotStore, SnapshotStoreError, SnapshotStoreResult,
};

/// File name used when none is configured.
pub const DEFAULT_SNAPSHOT_FILE: &str = "board.json";

/// Snapshot store persisting the board as one JSON file inside a directory.
#[derive(Clone)]
pub struct FileSnapshotStore {
    dir: Arc<Dir>,
    file_name: String,
}

impl fmt::Debug for FileSnapshotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSnapshotStore")
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

impl FileSnapshotStore {
    /// Creates a store writing [`DEFAULT_SNAPSHOT_FILE`] inside `dir`.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: DEFAULT_SNAPSHOT_FILE.to_owned(),
        }
    }

    /// Opens (creating if needed) a directory by ambient path.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] if the directory cannot be
    /// created or opened.
    pub fn open_ambient(path: &Utf8Path) -> SnapshotStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(SnapshotStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(SnapshotStoreError::persistence)?;
        Ok(Self::new(dir))
    }

    /// Uses a different snapshot file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Returns the snapshot file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn run_blocking<F, T>(&self, f: F) -> SnapshotStoreResult<T>
    where
        F: FnOnce(&Dir, &str) -> SnapshotStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || f(&dir, &file_name))
            .await
            .map_err(SnapshotStoreError::persistence)?
    }
}

#[async_trait]
impl BoardSnapshotStore for FileSnapshotStore {
    async fn load(&self) -> SnapshotStoreResult<Option<BoardSnapshot>> {
        self.run_blocking(|dir, file_name| match dir.read_to_string(file_name) {
            Ok(document) => BoardSnapshot::from_json(&document).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotStoreError::persistence(err)),
        })
        .await
    }

    async fn save(&self, snapshot: &BoardSnapshot) -> SnapshotStoreResult<()> {
        let document = snapshot.to_json()?;
        self.run_blocking(move |dir, file_name| {
            let staging = format!("{file_name}.tmp");
            write_durably(dir, &staging, document.as_bytes())
                .map_err(SnapshotStoreError::persistence)?;
            dir.rename(&staging, dir, file_name)
                .map_err(SnapshotStoreError::persistence)?;
            sync_directory(dir);
            tracing::debug!(file = file_name, "board snapshot written");
            Ok(())
        })
        .await
    }
}

/// Writes `contents` to a fresh `name` and flushes it to stable storage.
fn write_durably(dir: &Dir, name: &str, contents: &[u8]) -> io::Result<()> {
    let mut file = dir.create(name)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Flushes the directory entry so the rename survives a power loss.
///
/// Some platforms cannot open a directory as a file; the rename itself has
/// already succeeded there, so a failure is only logged.
fn sync_directory(dir: &Dir) {
    let synced = dir.open(".").and_then(|handle| handle.sync_all());
    if let Err(err) = synced {
        tracing::debug!(error = %err, "snapshot directory sync skipped");
    }
}
