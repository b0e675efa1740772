use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnalError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl AnnalError {
    /// True when the error was caused by rejected caller input rather than
    /// an internal failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, AnnalError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, AnnalError>;

// Custom Error Types:
//
// Annal supports custom error types through the `#[from] anyhow::Error` variant.
// Any error implementing `std::error::Error + Send + Sync + 'static` can be
// converted to `AnnalError::Other`.
//
// For better control, implement `From<YourError> for AnnalError` directly,
// or wrap `AnnalError` the way `annal-auth` does with its `AuthError`.
