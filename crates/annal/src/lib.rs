//! Annal: an in-memory, audited event ledger
//!
//! Annal provides a complete event ledger with:
//! - **Event store**: append-only sequence with monotonic ids and upfront validation
//! - **Audit trail**: `audit.*` namespaced events with metadata enrichment
//! - **Producers**: order lifecycle and poll engagement writers
//! - **Auth service**: credential and guest logins, audited end to end
//!
//! # Quick Start
//!
//! ```
//! use annal::prelude::*;
//!
//! # fn main() -> annal::Result<()> {
//! let db = AnnalDb::new();
//!
//! // Authenticate; the attempt and outcome land in the audit trail
//! let identity = db.auth().login("admin", "admin123")?;
//! assert_eq!(identity.role, "administrator");
//!
//! // Record business facts on the same store
//! db.orders().create_order("ORD-1", 99.95)?;
//! db.orders().fulfill_order("ORD-1", Some("TRK-7"))?;
//!
//! // Query per layer or across the whole sequence
//! assert_eq!(db.audit().count(None)?, 2);
//! assert_eq!(db.orders().query(&OrderFilter::new().order_id("ORD-1"))?.len(), 2);
//! assert_eq!(db.store().count(None)?, 4);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod prelude;

// Re-export core types
pub use annal_core::{AnnalError, Event, EventFilter, EventId, EventStore, Result, StoreStats};

// Re-export the audit trail
pub use annal_audit::{types as audit_types, AuditTrail, AuditWindow, TimeRange};

// Re-export producers
pub use annal_orders::{
    OrderAction, OrderFilter, OrderLedger, OrderStatus, ORDER_CANCELLED, ORDER_CREATED,
    ORDER_EVENT_TYPES, ORDER_FULFILLED, ORDER_UPDATED,
};
pub use annal_polls::{
    Engagement, EngagementFilter, EngagementKind, EngagementTracker, POLL_ENGAGEMENT,
};

// Re-export auth
pub use annal_auth::{
    default_users, AuthError, AuthService, Identity, UserRecord, GUEST_ROLE, MAX_CREDENTIAL_LEN,
};

pub use db::AnnalDb;
