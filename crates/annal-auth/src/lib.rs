//! # Annal Auth
//!
//! Credential and guest authentication with a full audit trail.
//!
//! The service provides:
//! - Staged validation (length cap, emptiness, username charset)
//! - Deliberately vague credential errors, with precise reasons in audit
//!   event metadata instead
//! - Suspicious-activity records for hostile-looking input
//! - Guest identities with generated usernames
//!
//! ## Example
//!
//! ```rust
//! use annal_audit::AuditTrail;
//! use annal_auth::AuthService;
//! use annal_core::EventStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(EventStore::new());
//! let service = AuthService::new(AuditTrail::new(store.clone()));
//!
//! let identity = service.login("admin", "admin123").unwrap();
//! assert_eq!(identity.role, "administrator");
//!
//! // Both the attempt and the outcome are now in the store.
//! assert_eq!(store.count(None).unwrap(), 2);
//! ```

pub mod error;
pub mod service;
pub mod users;

pub use error::{AuthError, Result};
pub use service::{AuthService, Identity, GUEST_ROLE, MAX_CREDENTIAL_LEN};
pub use users::{default_users, UserRecord};
