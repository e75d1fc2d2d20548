//! Availability queries served from whatever snapshot the store holds now.

use chrono::{DateTime, Utc};
use thiserror::Error;

use stockgate_inventory::{
    CartLine, CartLineResult, Snapshot, StockQueryResult, query_by_sku, query_cart,
};

use crate::error::StoreError;
use crate::snapshot_store::SnapshotStore;

/// Why a query could not be answered.
///
/// A missing or unreadable snapshot is reported as `ServiceUnavailable`, never
/// as "no stock": absent stock and a broken feed must stay distinguishable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("stock data unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("stock data could not be read: {0}")]
    Storage(String),
}

impl From<StoreError> for QueryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(msg) | StoreError::Corrupt(msg) => {
                QueryError::ServiceUnavailable(msg)
            }
            StoreError::Storage(msg) | StoreError::InvalidInput(msg) => QueryError::Storage(msg),
        }
    }
}

/// Stock query engine over an injected [`SnapshotStore`].
///
/// Each call reads the snapshot once and answers the whole batch from it, so
/// one batch never mixes two snapshots.
#[derive(Debug, Clone)]
pub struct StockQueryEngine<S> {
    store: S,
}

impl<S> StockQueryEngine<S>
where
    S: SnapshotStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn snapshot(&self) -> Result<Snapshot, QueryError> {
        self.store.read_all().await.map_err(|e| {
            tracing::warn!(kind = e.kind(), "stock snapshot unavailable: {e}");
            QueryError::from(e)
        })
    }

    /// Counts for the requested SKUs; SKUs missing from the snapshot are omitted.
    pub async fn query_by_sku<T>(
        &self,
        skus: &[T],
        warehouse_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<StockQueryResult>, QueryError>
    where
        T: AsRef<str>,
    {
        let snapshot = self.snapshot().await?;
        Ok(query_by_sku(&snapshot, skus, warehouse_id, now))
    }

    /// Clamped counts for each cart line; unknown offers answer zero.
    pub async fn query_cart(&self, lines: &[CartLine]) -> Result<Vec<CartLineResult>, QueryError> {
        let snapshot = self.snapshot().await?;
        Ok(query_cart(&snapshot, lines))
    }
}
