//! Order lifecycle vocabulary.

use annal_core::{AnnalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event type recorded when an order is created.
pub const ORDER_CREATED: &str = "order_created";

/// Event type recorded on a status change.
pub const ORDER_UPDATED: &str = "order_updated";

/// Event type recorded on cancellation.
pub const ORDER_CANCELLED: &str = "order_cancelled";

/// Event type recorded on fulfillment.
pub const ORDER_FULFILLED: &str = "order_fulfilled";

/// All order event types.
pub const ORDER_EVENT_TYPES: [&str; 4] =
    [ORDER_CREATED, ORDER_UPDATED, ORDER_CANCELLED, ORDER_FULFILLED];

/// Status carried in order event metadata.
///
/// The ledger records status changes as independent facts; any status may
/// follow any other, and no transition graph is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    /// The lowercase string stored in event metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Fulfilled => "fulfilled",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AnnalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "fulfilled" => Ok(OrderStatus::Fulfilled),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(AnnalError::Validation(format!(
                "Invalid order status: '{}'",
                other
            ))),
        }
    }
}

/// Kind of order event, used when filtering queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    Created,
    Updated,
    Cancelled,
    Fulfilled,
}

impl OrderAction {
    /// The event type literal stored for this action.
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderAction::Created => ORDER_CREATED,
            OrderAction::Updated => ORDER_UPDATED,
            OrderAction::Cancelled => ORDER_CANCELLED,
            OrderAction::Fulfilled => ORDER_FULFILLED,
        }
    }
}
