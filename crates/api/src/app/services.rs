//! Store wiring shared by all handlers.

use std::sync::Arc;

use stockgate_infra::{
    FsOrderEventStore, FsSnapshotStore, GatewayConfig, InMemoryOrderEventStore,
    InMemorySnapshotStore, OrderEventStore, SnapshotStore, StockQueryEngine,
};

/// Handles to the durable stores, injected into handlers as an `Extension`.
#[derive(Clone)]
pub struct AppServices {
    pub stock: StockQueryEngine<Arc<dyn SnapshotStore>>,
    pub orders: Arc<dyn OrderEventStore>,
}

impl AppServices {
    pub fn new(snapshots: Arc<dyn SnapshotStore>, orders: Arc<dyn OrderEventStore>) -> Self {
        Self {
            stock: StockQueryEngine::new(snapshots),
            orders,
        }
    }

    /// The snapshot slot behind the query engine (for replacement).
    pub fn snapshots(&self) -> &Arc<dyn SnapshotStore> {
        self.stock.store()
    }
}

/// File-backed stores under the configured data directory.
pub fn build_fs_services(config: &GatewayConfig) -> AppServices {
    let snapshots = FsSnapshotStore::new(config.snapshot_path()).with_io_timeout(config.io_timeout);
    let orders = FsOrderEventStore::new(config.orders_dir()).with_io_timeout(config.io_timeout);

    tracing::info!(
        snapshot = %snapshots.path().display(),
        orders = %orders.dir().display(),
        "using file-backed stores"
    );

    AppServices::new(Arc::new(snapshots), Arc::new(orders))
}

/// In-memory stores (dev/test).
pub fn build_in_memory_services() -> AppServices {
    AppServices::new(
        Arc::new(InMemorySnapshotStore::new()),
        Arc::new(InMemoryOrderEventStore::new()),
    )
}
