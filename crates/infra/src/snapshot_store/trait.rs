use std::sync::Arc;

use serde_json::Value as JsonValue;

use stockgate_inventory::Snapshot;

use crate::error::StoreError;

/// Durable holder of the current stock snapshot.
///
/// Implementations must:
/// - make `replace` atomic with respect to readers and crashes
/// - fail `read_all` with `NotFound` until the first `replace`
/// - fail `read_all` with `Corrupt` when the persisted form does not parse
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Overwrite the persisted snapshot in full.
    async fn replace(&self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Load the currently persisted snapshot.
    async fn read_all(&self) -> Result<Snapshot, StoreError>;

    /// Validate a raw upstream payload, then [`SnapshotStore::replace`].
    ///
    /// A payload that is not a list of sku/count records fails with
    /// `InvalidInput` and leaves the stored snapshot untouched.
    async fn replace_json(&self, payload: JsonValue) -> Result<Snapshot, StoreError> {
        let snapshot = Snapshot::from_json(payload)?;
        self.replace(&snapshot).await?;
        Ok(snapshot)
    }
}

#[async_trait::async_trait]
impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    async fn replace(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        (**self).replace(snapshot).await
    }

    async fn read_all(&self) -> Result<Snapshot, StoreError> {
        (**self).read_all().await
    }
}
