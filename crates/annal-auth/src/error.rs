//! Error types for the auth service.

use thiserror::Error;

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors surfaced to login callers.
///
/// The display strings are the exact messages a caller may show to an end
/// user. Credential failures share one deliberately vague message so the
/// error never reveals whether the username exists; the audit trail holds
/// the precise reason.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Username was empty after trimming.
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Password was empty after trimming.
    #[error("Password cannot be empty")]
    PasswordEmpty,

    /// Username or password exceeded the length cap before trimming.
    #[error("Username or password exceeds the maximum length of 255 characters")]
    CredentialTooLong,

    /// Username contained characters outside `A-Z a-z 0-9 . _ -`.
    #[error("Username contains invalid characters")]
    InvalidUsernameCharacters,

    /// Unknown user or wrong password; the two are indistinguishable here.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Something failed inside the service, e.g. the audit write. Details
    /// go to the log and the audit trail, never to the caller.
    #[error("Login failed due to an unexpected internal error")]
    Internal,
}

// Lets applications funnel auth failures into the ledger-wide error type
// with `?`.
impl From<AuthError> for annal_core::AnnalError {
    fn from(err: AuthError) -> Self {
        annal_core::AnnalError::Other(err.into())
    }
}
