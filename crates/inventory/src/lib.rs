//! Stock snapshot and availability lookup.
//!
//! This crate contains the stock rules of the gateway, implemented purely as
//! deterministic logic over an in-memory [`Snapshot`] (no IO, no HTTP, no
//! storage).

pub mod availability;
pub mod snapshot;

pub use availability::{
    query_by_sku, query_cart, CartLine, CartLineResult, StockKind, StockQueryResult,
};
pub use snapshot::{Snapshot, SkuIndex, StockRecord};
