//! Audit event vocabulary.
//!
//! Every audit event type carries the `audit.` prefix; an unfiltered
//! [`AuditTrail::query`](crate::AuditTrail::query) matches on that prefix,
//! so producers of new audit event types must keep it.

/// Namespace prefix shared by all audit event types.
pub const AUDIT_PREFIX: &str = "audit.";

/// Severity stored when the caller supplies none.
pub const DEFAULT_SEVERITY: &str = "info";

/// Source stored when the caller supplies none.
pub const DEFAULT_SOURCE: &str = "system";

/// A credential login was attempted (recorded before the outcome is known).
pub const LOGIN_ATTEMPT: &str = "audit.login_attempt";

/// A login succeeded and an identity was issued.
pub const LOGIN_SUCCESS: &str = "audit.login_success";

/// A login failed on credentials or validation.
pub const LOGIN_FAILURE: &str = "audit.login_failure";

/// Input looked hostile or an internal failure occurred mid-login.
pub const SUSPICIOUS_ACTIVITY: &str = "audit.suspicious_activity";
