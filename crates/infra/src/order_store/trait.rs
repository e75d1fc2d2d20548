use std::sync::Arc;

use chrono::Utc;
use serde_json::Value as JsonValue;

use stockgate_core::EventId;
use stockgate_orders::{OrderEvent, OrderEventKind, StoredOrderEvent};

use crate::error::StoreError;

/// Durable, append-only order event store.
///
/// ## Append Semantics
///
/// `append_event()`:
/// - generates a new identifier per call (never content-derived)
/// - persists the record under that identifier
/// - never overwrites: a slot collision is retried with a new identifier
///
/// ## List Semantics
///
/// `list_all()` returns every readable record in unspecified order. A single
/// unreadable record is skipped (and logged), not fatal for the listing.
#[async_trait::async_trait]
pub trait OrderEventStore: Send + Sync {
    /// Persist `event` under a freshly generated id and return it.
    async fn append_event(&self, event: OrderEvent) -> Result<EventId, StoreError>;

    /// Enumerate all stored events.
    async fn list_all(&self) -> Result<Vec<StoredOrderEvent>, StoreError>;

    /// Fetch one event by id; `Ok(None)` if no such event exists.
    async fn get(&self, id: EventId) -> Result<Option<StoredOrderEvent>, StoreError>;

    /// Record an inbound partner notification received now.
    async fn append(
        &self,
        authorization_key: &str,
        kind: OrderEventKind,
        payload: JsonValue,
    ) -> Result<EventId, StoreError> {
        self.append_event(OrderEvent::new(authorization_key, kind, payload, Utc::now()))
            .await
    }
}

#[async_trait::async_trait]
impl<S> OrderEventStore for Arc<S>
where
    S: OrderEventStore + ?Sized,
{
    async fn append_event(&self, event: OrderEvent) -> Result<EventId, StoreError> {
        (**self).append_event(event).await
    }

    async fn list_all(&self) -> Result<Vec<StoredOrderEvent>, StoreError> {
        (**self).list_all().await
    }

    async fn get(&self, id: EventId) -> Result<Option<StoredOrderEvent>, StoreError> {
        (**self).get(id).await
    }
}
