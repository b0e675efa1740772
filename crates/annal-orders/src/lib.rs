//! # Annal Orders
//!
//! Order lifecycle events on top of the Annal event store.
//!
//! The ledger provides:
//! - Producers for created / updated / cancelled / fulfilled facts
//! - Upfront validation of identifiers, amounts, and free-text fields
//! - Metadata-driven queries with an [`OrderFilter`]
//!
//! Orders have no row of their own; their state is whatever the event
//! sequence says it is. Consumers wanting "current status" fold the
//! events for an order id in insertion order.

pub mod ledger;
pub mod status;

pub use ledger::{OrderFilter, OrderLedger, MAX_ORDER_ID_LEN, MAX_REASON_LEN, MAX_TRACKING_LEN};
pub use status::{
    OrderAction, OrderStatus, ORDER_CANCELLED, ORDER_CREATED, ORDER_EVENT_TYPES, ORDER_FULFILLED,
    ORDER_UPDATED,
};
