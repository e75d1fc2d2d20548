//! Order lifecycle events received from the marketplace partner.
//!
//! Events are stored opaquely: no order-state machine is enforced, a status
//! change is simply another appended event.

pub mod event;

pub use event::{OrderEvent, OrderEventKind, StoredOrderEvent};
