//! Directory-backed order event store: one JSON file per event.
//!
//! Layout: `<dir>/<event-id>.json`. A record is first written to a hidden
//! temp file and then hard-linked to its final name. The link fails if the
//! name is taken, which gives no-overwrite semantics without any lock, and
//! readers never see a half-written `.json` file.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::instrument;

use stockgate_core::EventId;
use stockgate_orders::{OrderEvent, StoredOrderEvent};

use super::MAX_ID_ATTEMPTS;
use super::r#trait::OrderEventStore;
use crate::error::StoreError;
use crate::io::{bounded, discard, storage_error, write_new_synced};

/// Directory name used inside the data directory.
pub const ORDERS_DIR_NAME: &str = "orders";

const RECORD_EXTENSION: &str = "json";
const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct FsOrderEventStore {
    dir: PathBuf,
    io_timeout: Duration,
}

impl FsOrderEventStore {
    /// Store events directly in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    /// Store events in [`ORDERS_DIR_NAME`] under `data_dir`.
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(ORDERS_DIR_NAME))
    }

    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: EventId) -> PathBuf {
        self.dir.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    fn temp_path(&self, id: EventId) -> PathBuf {
        self.dir.join(format!(".{id}.tmp"))
    }

    /// Try to claim the slot for `id`. `Ok(false)` means the slot is taken.
    async fn try_claim(&self, id: EventId, bytes: &[u8]) -> Result<bool, StoreError> {
        let temp = self.temp_path(id);
        if let Err(e) = bounded(self.io_timeout, write_new_synced(&temp, bytes)).await {
            // Someone else's temp file: leave it alone.
            if e.kind() == io::ErrorKind::AlreadyExists {
                return Ok(false);
            }
            discard(&temp).await;
            return Err(storage_error("write", &temp, e));
        }

        let target = self.record_path(id);
        let linked = bounded(self.io_timeout, tokio::fs::hard_link(&temp, &target)).await;
        discard(&temp).await;

        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(storage_error("link", &target, e)),
        }
    }

    /// Append under ids drawn from `next_id`, retrying while the slot is taken.
    async fn append_with_ids(
        &self,
        event: OrderEvent,
        mut next_id: impl FnMut() -> EventId,
    ) -> Result<EventId, StoreError> {
        bounded(self.io_timeout, tokio::fs::create_dir_all(&self.dir))
            .await
            .map_err(|e| storage_error("create directory", &self.dir, e))?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = next_id();
            let record = StoredOrderEvent::new(id, event.clone());
            let bytes = serde_json::to_vec_pretty(&record).map_err(|e| {
                StoreError::InvalidInput(format!("order event serialization failed: {e}"))
            })?;

            if self.try_claim(id, &bytes).await? {
                tracing::debug!(event_id = %id, "order event stored");
                return Ok(id);
            }

            tracing::warn!(event_id = %id, attempt, "event id collision; retrying with a new id");
        }

        Err(StoreError::Storage(format!(
            "no free event id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }

    async fn read_record(&self, path: &Path) -> Result<StoredOrderEvent, StoreError> {
        let bytes = bounded(self.io_timeout, tokio::fs::read(path))
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    StoreError::NotFound(format!("{} does not exist", path.display()))
                }
                _ => storage_error("read", path, e),
            })?;

        let record: StoredOrderEvent = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?;

        // The file name is the identity; a body claiming another id is not trusted.
        let expected = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if record.id.to_string() != expected {
            return Err(StoreError::Corrupt(format!(
                "{}: embedded id {} does not match file name",
                path.display(),
                record.id
            )));
        }

        Ok(record)
    }
}

#[async_trait::async_trait]
impl OrderEventStore for FsOrderEventStore {
    #[instrument(skip(self, event), fields(dir = %self.dir.display(), kind = %event.kind))]
    async fn append_event(&self, event: OrderEvent) -> Result<EventId, StoreError> {
        self.append_with_ids(event, EventId::new).await
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn list_all(&self) -> Result<Vec<StoredOrderEvent>, StoreError> {
        let mut entries = match bounded(self.io_timeout, tokio::fs::read_dir(&self.dir)).await {
            Ok(entries) => entries,
            // Nothing appended yet.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(storage_error("list", &self.dir, e)),
        };

        let mut events = Vec::new();
        loop {
            let entry = match bounded(self.io_timeout, entries.next_entry()).await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => return Err(storage_error("list", &self.dir, e)),
            };

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            match self.read_record(&path).await {
                Ok(record) => events.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), kind = e.kind(), "skipping unreadable order event: {e}");
                }
            }
        }

        Ok(events)
    }

    async fn get(&self, id: EventId) -> Result<Option<StoredOrderEvent>, StoreError> {
        match self.read_record(&self.record_path(id)).await {
            Ok(record) => Ok(Some(record)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
