//! Static user records.

use std::fmt;

/// A username, password, and role from the configured user list.
///
/// Passwords are compared in plain text; this is a demonstration user
/// store, not a credential vault.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }
}

// Passwords never appear in debug output.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// The built-in demonstration users.
pub fn default_users() -> Vec<UserRecord> {
    vec![
        UserRecord::new("admin", "admin123", "administrator"),
        UserRecord::new("user", "user123", "user"),
        UserRecord::new("support", "support123", "support"),
    ]
}
