//! Annal Prelude
//!
//! Import this to get all commonly used types:
//!
//! ```
//! use annal::prelude::*;
//! ```

// Core types
pub use crate::{AnnalDb, AnnalError, Event, EventFilter, EventId, EventStore, Result, StoreStats};

// Audit trail
pub use crate::{audit_types, AuditTrail, AuditWindow, TimeRange};

// Producers
pub use crate::{
    Engagement, EngagementFilter, EngagementKind, EngagementTracker, OrderAction, OrderFilter,
    OrderLedger, OrderStatus, ORDER_CANCELLED, ORDER_CREATED, ORDER_EVENT_TYPES, ORDER_FULFILLED,
    ORDER_UPDATED, POLL_ENGAGEMENT,
};

// Auth
pub use crate::{
    default_users, AuthError, AuthService, Identity, UserRecord, GUEST_ROLE, MAX_CREDENTIAL_LEN,
};

// Re-export common external deps
pub use anyhow;
pub use serde::{Deserialize, Serialize};
pub use serde_json::json;
pub use std::sync::Arc;
pub use tracing;
