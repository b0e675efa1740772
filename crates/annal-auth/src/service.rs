use crate::error::{AuthError, Result};
use crate::users::{default_users, UserRecord};
use annal_audit::{types, AuditTrail};
use annal_core::observe;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Maximum accepted byte length for a username or password, measured
/// before trimming.
pub const MAX_CREDENTIAL_LEN: usize = 255;

/// Role assigned to generated guest identities.
pub const GUEST_ROLE: &str = "guest";

/// An authenticated identity. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: String,
}

/// Credential and guest authentication, audited end to end.
///
/// Every login attempt leaves audit events behind: structurally valid
/// attempts are recorded before their outcome, hostile-looking input is
/// recorded as suspicious activity, and outcomes carry a precise reason
/// in metadata even when the caller only sees a generic error.
#[derive(Clone)]
pub struct AuthService {
    audit: AuditTrail,
    users: Vec<UserRecord>,
}

impl AuthService {
    /// Create a service with the built-in user list.
    pub fn new(audit: AuditTrail) -> Self {
        Self::with_users(audit, default_users())
    }

    /// Create a service with a custom user list.
    pub fn with_users(audit: AuditTrail, users: Vec<UserRecord>) -> Self {
        Self { audit, users }
    }

    /// Authenticate a username and password against the user list.
    ///
    /// Validation runs in a fixed order: length cap (pre-trim), emptiness
    /// (post-trim), then the username charset. Input failing the length or
    /// charset checks is audited as suspicious activity and never as a
    /// login attempt. Credential mismatches return
    /// [`AuthError::InvalidCredentials`] whether the user exists or not.
    pub fn login(&self, username: &str, password: &str) -> Result<Identity> {
        let result = self.authenticate(username, password);
        observe::record_login(result.is_ok());
        result
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Identity> {
        if username.len() > MAX_CREDENTIAL_LEN || password.len() > MAX_CREDENTIAL_LEN {
            self.emit(
                types::SUSPICIOUS_ACTIVITY,
                "Login rejected: credential exceeds length limit",
                json!({
                    "reason": "credential_too_long",
                    "severity": "warning",
                    "username_length": username.len(),
                    "password_length": password.len(),
                }),
            )?;
            return Err(AuthError::CredentialTooLong);
        }

        let username = username.trim();
        let password = password.trim();

        if username.is_empty() {
            self.emit(
                types::LOGIN_FAILURE,
                "Login failed: empty username",
                json!({ "reason": "empty_username" }),
            )?;
            return Err(AuthError::UsernameEmpty);
        }
        if password.is_empty() {
            self.emit(
                types::LOGIN_FAILURE,
                "Login failed: empty password",
                json!({ "reason": "empty_password" }),
            )?;
            return Err(AuthError::PasswordEmpty);
        }

        if !username.chars().all(is_username_char) {
            self.emit(
                types::SUSPICIOUS_ACTIVITY,
                "Login rejected: username contains invalid characters",
                json!({ "reason": "invalid_characters", "severity": "warning" }),
            )?;
            return Err(AuthError::InvalidUsernameCharacters);
        }

        self.emit(
            types::LOGIN_ATTEMPT,
            "Login attempt",
            json!({ "username": username }),
        )?;

        let user = match self.users.iter().find(|u| u.username == username) {
            Some(user) => user,
            None => {
                self.emit(
                    types::LOGIN_FAILURE,
                    "Login failed: unknown user",
                    json!({ "reason": "user_not_found", "username": username }),
                )?;
                return Err(AuthError::InvalidCredentials);
            }
        };

        if user.password != password {
            self.emit(
                types::LOGIN_FAILURE,
                "Login failed: incorrect password",
                json!({ "reason": "incorrect_password", "username": username }),
            )?;
            return Err(AuthError::InvalidCredentials);
        }

        self.emit(
            types::LOGIN_SUCCESS,
            "Login successful",
            json!({ "username": user.username, "role": user.role }),
        )?;
        tracing::info!("User {} logged in with role {}", user.username, user.role);

        Ok(Identity {
            username: user.username.clone(),
            role: user.role.clone(),
        })
    }

    /// Issue a guest identity without credentials.
    ///
    /// The username is `guest_<unix seconds>_<8 hex chars>`; uniqueness is
    /// probabilistic, not checked against the user list. Guest issuance is
    /// audited as a login success.
    pub fn guest_login(&self) -> Result<Identity> {
        let suffix = Uuid::new_v4().simple().to_string();
        let username = format!("guest_{}_{}", Utc::now().timestamp(), &suffix[..8]);

        self.emit(
            types::LOGIN_SUCCESS,
            "Guest login",
            json!({ "username": username, "role": GUEST_ROLE }),
        )?;
        observe::record_login(true);
        tracing::info!("Guest identity {} issued", username);

        Ok(Identity {
            username,
            role: GUEST_ROLE.to_string(),
        })
    }

    /// Record one audit event. A failing write is logged, answered with a
    /// best-effort suspicious-activity record, and mapped to
    /// [`AuthError::Internal`] so no store detail reaches the caller.
    fn emit(&self, event_type: &str, message: &str, metadata: serde_json::Value) -> Result<()> {
        if let Err(err) = self.audit.record(event_type, message, Some(metadata)) {
            tracing::error!("Failed to record {} audit event: {}", event_type, err);
            let _ = self.audit.record(
                types::SUSPICIOUS_ACTIVITY,
                "Unexpected error during authentication",
                Some(json!({ "reason": "unexpected_error", "severity": "warning" })),
            );
            return Err(AuthError::Internal);
        }
        Ok(())
    }
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use annal_core::EventStore;
    use std::sync::Arc;

    fn setup() -> (Arc<EventStore>, AuthService) {
        let store = Arc::new(EventStore::new());
        let audit = AuditTrail::new(store.clone());
        let service = AuthService::new(audit);
        (store, service)
    }

    fn audit_types(store: &EventStore) -> Vec<String> {
        store
            .query(None)
            .unwrap()
            .into_iter()
            .map(|e| e.event_type)
            .collect()
    }

    #[test]
    fn test_login_success_returns_identity() {
        let (_store, service) = setup();
        let identity = service.login("admin", "admin123").unwrap();
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.role, "administrator");
    }

    #[test]
    fn test_login_success_audits_attempt_then_success() {
        let (store, service) = setup();
        service.login("admin", "admin123").unwrap();

        assert_eq!(
            audit_types(&store),
            vec![types::LOGIN_ATTEMPT, types::LOGIN_SUCCESS]
        );

        let success = store.query(Some(types::LOGIN_SUCCESS)).unwrap();
        assert_eq!(success[0].metadata_str("username"), Some("admin"));
        assert_eq!(success[0].metadata_str("role"), Some("administrator"));
    }

    #[test]
    fn test_all_default_users_can_log_in() {
        let (_store, service) = setup();
        assert_eq!(service.login("admin", "admin123").unwrap().role, "administrator");
        assert_eq!(service.login("user", "user123").unwrap().role, "user");
        assert_eq!(service.login("support", "support123").unwrap().role, "support");
    }

    #[test]
    fn test_credentials_are_trimmed_before_comparison() {
        let (_store, service) = setup();
        let identity = service.login("  admin  ", " admin123 ").unwrap();
        assert_eq!(identity.username, "admin");
    }

    #[test]
    fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let (store, service) = setup();

        let unknown = service.login("nobody", "whatever1").unwrap_err();
        let wrong = service.login("admin", "wrong-password").unwrap_err();

        assert_eq!(unknown, AuthError::InvalidCredentials);
        assert_eq!(wrong, AuthError::InvalidCredentials);
        assert_eq!(unknown.to_string(), "Invalid username or password");
        assert_eq!(unknown.to_string(), wrong.to_string());

        // The audit trail still distinguishes the two.
        let failures = store.query(Some(types::LOGIN_FAILURE)).unwrap();
        assert_eq!(failures[0].metadata_str("reason"), Some("user_not_found"));
        assert_eq!(failures[1].metadata_str("reason"), Some("incorrect_password"));
    }

    #[test]
    fn test_empty_username_fails_without_attempt_event() {
        let (store, service) = setup();
        let err = service.login("   ", "admin123").unwrap_err();

        assert_eq!(err, AuthError::UsernameEmpty);
        assert_eq!(err.to_string(), "Username cannot be empty");
        assert_eq!(audit_types(&store), vec![types::LOGIN_FAILURE]);

        let failure = store.query(Some(types::LOGIN_FAILURE)).unwrap();
        assert_eq!(failure[0].metadata_str("reason"), Some("empty_username"));
    }

    #[test]
    fn test_empty_password_fails_without_attempt_event() {
        let (store, service) = setup();
        let err = service.login("admin", "   ").unwrap_err();

        assert_eq!(err, AuthError::PasswordEmpty);
        assert_eq!(err.to_string(), "Password cannot be empty");
        assert_eq!(audit_types(&store), vec![types::LOGIN_FAILURE]);
    }

    #[test]
    fn test_overlong_credential_is_suspicious() {
        let (store, service) = setup();

        let long_username = "a".repeat(MAX_CREDENTIAL_LEN + 1);
        let err = service.login(&long_username, "admin123").unwrap_err();
        assert_eq!(err, AuthError::CredentialTooLong);
        assert!(err.to_string().contains("maximum length"));

        assert_eq!(audit_types(&store), vec![types::SUSPICIOUS_ACTIVITY]);
        let events = store.query(Some(types::SUSPICIOUS_ACTIVITY)).unwrap();
        assert_eq!(events[0].metadata_str("reason"), Some("credential_too_long"));
        assert_eq!(events[0].metadata_str("severity"), Some("warning"));
        // The raw credential itself is never stored.
        assert!(!serde_json::to_string(&events[0]).unwrap().contains(&long_username));
    }

    #[test]
    fn test_length_cap_is_measured_before_trimming() {
        let (_store, service) = setup();

        // 255 bytes exactly passes the cap.
        let max_username = "a".repeat(MAX_CREDENTIAL_LEN);
        assert_eq!(
            service.login(&max_username, "pw123").unwrap_err(),
            AuthError::InvalidCredentials
        );

        // Padding that would trim away still counts against the cap.
        let padded = format!("{} ", "a".repeat(MAX_CREDENTIAL_LEN));
        assert_eq!(
            service.login(&padded, "pw123").unwrap_err(),
            AuthError::CredentialTooLong
        );
    }

    #[test]
    fn test_invalid_username_characters_are_suspicious() {
        let (store, service) = setup();

        for bad in ["alice!", "alice bob", "alice@example.com", "rm -rf"] {
            let err = service.login(bad, "pw123").unwrap_err();
            assert_eq!(err, AuthError::InvalidUsernameCharacters);
            assert_eq!(err.to_string(), "Username contains invalid characters");
        }

        let events = store.query(Some(types::SUSPICIOUS_ACTIVITY)).unwrap();
        assert_eq!(events.len(), 4);
        assert!(events
            .iter()
            .all(|e| e.metadata_str("reason") == Some("invalid_characters")));
        // No attempt events were recorded for any of them.
        assert_eq!(store.count(Some(types::LOGIN_ATTEMPT)).unwrap(), 0);
    }

    #[test]
    fn test_dots_underscores_and_hyphens_are_legal() {
        let (store, service) = setup();
        // Passes the charset check and reaches the user lookup.
        let err = service.login("first.last_name-2", "pw123").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(store.count(Some(types::LOGIN_ATTEMPT)).unwrap(), 1);
    }

    #[test]
    fn test_custom_user_list() {
        let store = Arc::new(EventStore::new());
        let audit = AuditTrail::new(store);
        let service = AuthService::with_users(
            audit,
            vec![UserRecord::new("zoe", "hunter2", "operator")],
        );

        assert_eq!(service.login("zoe", "hunter2").unwrap().role, "operator");
        // The built-in users are not present.
        assert_eq!(
            service.login("admin", "admin123").unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn test_guest_login_shape_and_audit() {
        let (store, service) = setup();
        let identity = service.guest_login().unwrap();

        assert_eq!(identity.role, GUEST_ROLE);
        let parts: Vec<&str> = identity.username.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "guest");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));

        // Audited as a success, with no attempt event.
        assert_eq!(audit_types(&store), vec![types::LOGIN_SUCCESS]);
        let success = store.query(Some(types::LOGIN_SUCCESS)).unwrap();
        assert_eq!(
            success[0].metadata_str("username"),
            Some(identity.username.as_str())
        );
    }

    #[test]
    fn test_guest_identities_differ() {
        let (_store, service) = setup();
        let first = service.guest_login().unwrap();
        let second = service.guest_login().unwrap();
        assert_ne!(first.username, second.username);
    }
}
