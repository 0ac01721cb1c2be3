//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic function of current state; none of them
/// is retried by the core. `NotFound` covers both "the row does not exist"
/// and "the row exists but is outside the caller's scope" on read paths, so
/// existence never leaks across scopes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A structurally invalid cross-reference or input (e.g. manager/region
    /// mismatch, duplicate active assignment, unknown delegate id).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found, or was filtered out of scope.
    #[error("not found")]
    NotFound,

    /// Missing or invalid credentials/token; a new login is required.
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated, but role or ownership is insufficient.
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
