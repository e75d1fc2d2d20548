//! File-backed snapshot slot.
//!
//! The snapshot lives in one pretty-printed JSON file. `replace` writes a
//! uniquely named temp file next to it, fsyncs, then renames it over the
//! target, so a reader (or a restart after a crash) only ever sees a complete
//! file.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::instrument;
use uuid::Uuid;

use stockgate_inventory::Snapshot;

use super::r#trait::SnapshotStore;
use crate::error::StoreError;
use crate::io::{bounded, discard, storage_error, write_new_synced};

/// File name used inside the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "stock_data.json";

const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    path: PathBuf,
    io_timeout: Duration,
}

impl FsSnapshotStore {
    /// Store the snapshot at exactly `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    /// Store the snapshot as [`SNAPSHOT_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SNAPSHOT_FILE_NAME))
    }

    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()))
    }
}

#[async_trait::async_trait]
impl SnapshotStore for FsSnapshotStore {
    #[instrument(skip(self, snapshot), fields(path = %self.path.display(), records = snapshot.len()))]
    async fn replace(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| StoreError::InvalidInput(format!("snapshot serialization failed: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            bounded(self.io_timeout, tokio::fs::create_dir_all(parent))
                .await
                .map_err(|e| storage_error("create directory", parent, e))?;
        }

        let temp = self.temp_path();
        if let Err(e) = bounded(self.io_timeout, write_new_synced(&temp, &bytes)).await {
            discard(&temp).await;
            return Err(storage_error("write", &temp, e));
        }

        if let Err(e) = bounded(self.io_timeout, tokio::fs::rename(&temp, &self.path)).await {
            discard(&temp).await;
            return Err(storage_error("rename into", &self.path, e));
        }

        tracing::debug!("stock snapshot replaced");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read_all(&self) -> Result<Snapshot, StoreError> {
        let bytes = match bounded(self.io_timeout, tokio::fs::read(&self.path)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(
                    "no stock snapshot has been created".to_string(),
                ));
            }
            Err(e) => return Err(storage_error("read", &self.path, e)),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("persisted stock snapshot is unreadable: {e}");
            StoreError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stockgate_inventory::StockRecord;

    #[tokio::test]
    async fn read_before_replace_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::in_dir(dir.path());

        let err = store.read_all().await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn replace_then_read_round_trips_including_extra_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::in_dir(dir.path());

        let snapshot = Snapshot::from_json(json!([
            {"sku": "A", "count": 5, "name": "Чайник"},
            {"sku": "B", "count": 0},
        ]))
        .unwrap();

        store.replace(&snapshot).await.unwrap();
        assert_eq!(store.read_all().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn replace_overwrites_in_full_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::in_dir(dir.path());

        store
            .replace(&Snapshot::new(vec![StockRecord::new("A", 5), StockRecord::new("B", 2)]))
            .await
            .unwrap();
        let next = Snapshot::new(vec![StockRecord::new("C", 1)]);
        store.replace(&next).await.unwrap();

        assert_eq!(store.read_all().await.unwrap(), next);

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![SNAPSHOT_FILE_NAME.to_string()]);
    }

    #[tokio::test]
    async fn survives_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::new(vec![StockRecord::new("A", 3)]);

        FsSnapshotStore::in_dir(dir.path()).replace(&snapshot).await.unwrap();

        let reopened = FsSnapshotStore::in_dir(dir.path());
        assert_eq!(reopened.read_all().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn unparsable_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::in_dir(dir.path());
        std::fs::write(store.path(), b"[{\"sku\": \"A\", \"count\": ").unwrap();

        let err = store.read_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn creates_missing_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::in_dir(dir.path().join("nested").join("data"));

        store.replace(&Snapshot::default()).await.unwrap();
        assert!(store.read_all().await.unwrap().is_empty());
    }
}
