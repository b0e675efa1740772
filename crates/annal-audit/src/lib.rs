//! # Annal Audit
//!
//! Audit trail capabilities built on top of the Annal event store.
//!
//! The trail provides:
//! - Metadata enrichment (severity, source, audit timestamp defaults)
//! - Namespace-scoped queries over `audit.*` event types
//! - Inclusive time-range queries with normalized bounds
//!
//! ## Example
//!
//! ```rust
//! use annal_audit::{types, AuditTrail};
//! use annal_core::EventStore;
//! use std::sync::Arc;
//!
//! # fn main() -> annal_core::Result<()> {
//! let store = Arc::new(EventStore::new());
//! let trail = AuditTrail::new(store);
//!
//! trail.record(types::LOGIN_ATTEMPT, "Login attempt", None)?;
//!
//! // Unfiltered queries see only the audit namespace.
//! for event in trail.query(None)? {
//!     println!("{}: {}", event.event_type, event.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod trail;
pub mod types;

pub use trail::{AuditTrail, AuditWindow, TimeRange};
