use crate::status::{
    OrderAction, OrderStatus, ORDER_CANCELLED, ORDER_CREATED, ORDER_EVENT_TYPES, ORDER_FULFILLED,
    ORDER_UPDATED,
};
use annal_core::{AnnalError, Event, EventStore, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Maximum accepted length for an order identifier.
pub const MAX_ORDER_ID_LEN: usize = 64;

/// Maximum accepted length for a cancellation reason.
pub const MAX_REASON_LEN: usize = 500;

/// Maximum accepted length for a tracking number.
pub const MAX_TRACKING_LEN: usize = 100;

/// Equality filters applied to order events. An empty filter matches every
/// order event.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Filter by order identifier.
    pub order_id: Option<String>,
    /// Filter by event kind.
    pub action: Option<OrderAction>,
    /// Filter by status, matching both the status recorded at creation and
    /// the new status recorded on updates.
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    /// Create a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by order identifier.
    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Filter by event kind.
    pub fn action(mut self, action: OrderAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Filter by status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Serialize)]
struct CreatedMeta<'a> {
    order_id: &'a str,
    status: OrderStatus,
    amount: f64,
}

#[derive(Serialize)]
struct UpdatedMeta<'a> {
    order_id: &'a str,
    new_status: OrderStatus,
}

#[derive(Serialize)]
struct CancelledMeta<'a> {
    order_id: &'a str,
    reason: Option<&'a str>,
}

#[derive(Serialize)]
struct FulfilledMeta<'a> {
    order_id: &'a str,
    tracking_number: Option<&'a str>,
}

/// Records order lifecycle facts on a shared [`EventStore`].
///
/// Each operation appends one event; nothing is read back first. The
/// ledger keeps no order table, so updating or cancelling an order that
/// was never created still succeeds and simply records the fact.
#[derive(Clone)]
pub struct OrderLedger {
    store: Arc<EventStore>,
}

impl OrderLedger {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// Record an `order_created` event with the default `pending` status.
    pub fn create_order(&self, order_id: &str, amount: f64) -> Result<Event> {
        self.create_order_with_status(order_id, amount, OrderStatus::Pending)
    }

    /// Record an `order_created` event with an explicit initial status.
    pub fn create_order_with_status(
        &self,
        order_id: &str,
        amount: f64,
        status: OrderStatus,
    ) -> Result<Event> {
        let order_id = validate_order_id(order_id)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(AnnalError::Validation(
                "Order amount must be a non-negative finite number".to_string(),
            ));
        }

        let metadata = to_metadata(&CreatedMeta {
            order_id,
            status,
            amount,
        })?;
        let event = self.store.create(
            ORDER_CREATED,
            &format!("Order {} created", order_id),
            Some(metadata),
        )?;
        tracing::debug!("Order {} created with status {}", order_id, status);
        Ok(event)
    }

    /// Record an `order_updated` event carrying the new status.
    pub fn update_order_status(&self, order_id: &str, new_status: OrderStatus) -> Result<Event> {
        let order_id = validate_order_id(order_id)?;
        let metadata = to_metadata(&UpdatedMeta {
            order_id,
            new_status,
        })?;
        let event = self.store.create(
            ORDER_UPDATED,
            &format!("Order {} status changed to {}", order_id, new_status),
            Some(metadata),
        )?;
        tracing::debug!("Order {} moved to {}", order_id, new_status);
        Ok(event)
    }

    /// Record an `order_cancelled` event. The reason is optional and stored
    /// as an explicit null when absent.
    pub fn cancel_order(&self, order_id: &str, reason: Option<&str>) -> Result<Event> {
        let order_id = validate_order_id(order_id)?;
        let reason = validate_optional("Cancellation reason", reason, MAX_REASON_LEN)?;
        let metadata = to_metadata(&CancelledMeta { order_id, reason })?;
        let event = self.store.create(
            ORDER_CANCELLED,
            &format!("Order {} cancelled", order_id),
            Some(metadata),
        )?;
        tracing::debug!("Order {} cancelled", order_id);
        Ok(event)
    }

    /// Record an `order_fulfilled` event. The tracking number is optional
    /// and stored as an explicit null when absent.
    pub fn fulfill_order(&self, order_id: &str, tracking_number: Option<&str>) -> Result<Event> {
        let order_id = validate_order_id(order_id)?;
        let tracking_number =
            validate_optional("Tracking number", tracking_number, MAX_TRACKING_LEN)?;
        let metadata = to_metadata(&FulfilledMeta {
            order_id,
            tracking_number,
        })?;
        let event = self.store.create(
            ORDER_FULFILLED,
            &format!("Order {} fulfilled", order_id),
            Some(metadata),
        )?;
        tracing::debug!("Order {} fulfilled", order_id);
        Ok(event)
    }

    /// Fetch order events in insertion order, narrowed by the filter.
    pub fn query(&self, filter: &OrderFilter) -> Result<Vec<Event>> {
        let events = self.store.query(None)?;
        Ok(events
            .into_iter()
            .filter(|event| matches(event, filter))
            .collect())
    }

    /// Count order events matching the filter.
    pub fn count(&self, filter: &OrderFilter) -> Result<usize> {
        Ok(self.query(filter)?.len())
    }
}

fn matches(event: &Event, filter: &OrderFilter) -> bool {
    if !ORDER_EVENT_TYPES.contains(&event.event_type.as_str()) {
        return false;
    }
    if let Some(action) = filter.action {
        if event.event_type != action.event_type() {
            return false;
        }
    }
    if let Some(order_id) = &filter.order_id {
        if event.metadata_str("order_id") != Some(order_id.as_str()) {
            return false;
        }
    }
    if let Some(status) = filter.status {
        let wanted = status.as_str();
        let at_creation = event.metadata_str("status") == Some(wanted);
        let on_update = event.metadata_str("new_status") == Some(wanted);
        if !at_creation && !on_update {
            return false;
        }
    }
    true
}

fn validate_order_id(order_id: &str) -> Result<&str> {
    let trimmed = order_id.trim();
    if trimmed.is_empty() {
        return Err(AnnalError::Validation("Order ID cannot be empty".to_string()));
    }
    if trimmed.len() > MAX_ORDER_ID_LEN {
        return Err(AnnalError::Validation(format!(
            "Order ID exceeds maximum length of {} characters",
            MAX_ORDER_ID_LEN
        )));
    }
    Ok(trimmed)
}

fn validate_optional<'a>(
    field: &str,
    value: Option<&'a str>,
    max_len: usize,
) -> Result<Option<&'a str>> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(AnnalError::Validation(format!(
                    "{} cannot be empty when supplied",
                    field
                )));
            }
            if trimmed.len() > max_len {
                return Err(AnnalError::Validation(format!(
                    "{} exceeds maximum length of {} characters",
                    field, max_len
                )));
            }
            Ok(Some(trimmed))
        }
    }
}

fn to_metadata<T: Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload).map_err(|e| AnnalError::Serialization(e.to_string()))
}
