//! Infrastructure layer: durable stores, the query engine, configuration.

pub mod config;
pub mod error;
pub mod order_store;
pub mod query_engine;
pub mod snapshot_store;

mod io;

pub use config::{ConfigError, GatewayConfig};
pub use error::StoreError;
pub use order_store::{FsOrderEventStore, InMemoryOrderEventStore, OrderEventStore};
pub use query_engine::{QueryError, StockQueryEngine};
pub use snapshot_store::{FsSnapshotStore, InMemorySnapshotStore, SnapshotStore};
