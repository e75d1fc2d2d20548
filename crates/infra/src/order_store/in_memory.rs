use std::collections::HashMap;
use std::sync::RwLock;

use stockgate_core::EventId;
use stockgate_orders::{OrderEvent, StoredOrderEvent};

use super::MAX_ID_ATTEMPTS;
use super::r#trait::OrderEventStore;
use crate::error::StoreError;

/// In-memory order event store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryOrderEventStore {
    events: RwLock<HashMap<EventId, StoredOrderEvent>>,
}

impl InMemoryOrderEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OrderEventStore for InMemoryOrderEventStore {
    async fn append_event(&self, event: OrderEvent) -> Result<EventId, StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = EventId::new();
            if events.contains_key(&id) {
                continue;
            }
            events.insert(id, StoredOrderEvent::new(id, event));
            return Ok(id);
        }

        Err(StoreError::Storage(format!(
            "no free event id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }

    async fn list_all(&self) -> Result<Vec<StoredOrderEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        Ok(events.values().cloned().collect())
    }

    async fn get(&self, id: EventId) -> Result<Option<StoredOrderEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".to_string()))?;

        Ok(events.get(&id).cloned())
    }
}
