use std::sync::RwLock;

use stockgate_inventory::Snapshot;

use super::r#trait::SnapshotStore;
use crate::error::StoreError;

/// In-memory snapshot slot.
///
/// Intended for tests/dev. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    current: RwLock<Option<Snapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Some(snapshot)),
        }
    }
}

#[async_trait::async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn replace(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut current = self
            .current
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;
        *current = Some(snapshot.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<Snapshot, StoreError> {
        let current = self
            .current
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        current
            .clone()
            .ok_or_else(|| StoreError::NotFound("no stock snapshot has been created".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stockgate_inventory::StockRecord;

    #[tokio::test]
    async fn read_before_replace_is_not_found() {
        let store = InMemorySnapshotStore::new();
        let err = store.read_all().await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn replace_then_read_round_trips() {
        let store = InMemorySnapshotStore::new();
        let snapshot = Snapshot::new(vec![StockRecord::new("A", 5), StockRecord::new("B", 0)]);

        store.replace(&snapshot).await.unwrap();
        assert_eq!(store.read_all().await.unwrap(), snapshot);

        let next = Snapshot::new(vec![StockRecord::new("C", 1)]);
        store.replace(&next).await.unwrap();
        assert_eq!(store.read_all().await.unwrap(), next);
    }

    #[tokio::test]
    async fn malformed_payload_is_rejected_and_keeps_previous_snapshot() {
        let snapshot = Snapshot::new(vec![StockRecord::new("A", 5)]);
        let store = InMemorySnapshotStore::with_snapshot(snapshot.clone());

        let err = store.replace_json(json!({"not": "a list"})).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert_eq!(store.read_all().await.unwrap(), snapshot);
    }
}
