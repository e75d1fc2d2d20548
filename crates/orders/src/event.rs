use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockgate_core::EventId;
use stockgate_core::time::{rfc3339_seconds, truncate_to_seconds};

/// Which partner notification produced the event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEventKind {
    /// `POST /order/accept`
    Accepted,
    /// `POST /order/status`
    StatusChanged,
}

impl OrderEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderEventKind::Accepted => "accepted",
            OrderEventKind::StatusChanged => "status_changed",
        }
    }
}

impl core::fmt::Display for OrderEventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one inbound order notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Credential the partner called with. Stored, never interpreted.
    pub authorization_key: String,
    pub kind: OrderEventKind,
    /// Receipt time; lets readers sort, since enumeration order is unspecified.
    #[serde(with = "rfc3339_seconds")]
    pub received_at: DateTime<Utc>,
    /// Order body exactly as received.
    pub payload: JsonValue,
}

impl OrderEvent {
    pub fn new(
        authorization_key: impl Into<String>,
        kind: OrderEventKind,
        payload: JsonValue,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            authorization_key: authorization_key.into(),
            kind,
            received_at: truncate_to_seconds(received_at),
            payload,
        }
    }
}

/// An [`OrderEvent`] together with the identifier it was stored under.
///
/// This is also the persisted form: `{"id", "authorization_key", "kind",
/// "received_at", "payload"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrderEvent {
    pub id: EventId,
    #[serde(flatten)]
    pub event: OrderEvent,
}

impl StoredOrderEvent {
    pub fn new(id: EventId, event: OrderEvent) -> Self {
        Self { id, event }
    }
}
