//! Shared error type across resume crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed or incomplete request.
    BadRequest,
    /// A required record has not been provisioned.
    NotFound,
    /// Concurrent writers kept winning until the retry budget ran out.
    Conflict,
    /// The document store could not be reached in time.
    Unavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ResumeError>;

/// Unified error type used by core and the API service.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ResumeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ResumeError::NotFound(_) => ClientCode::NotFound,
            ResumeError::Conflict(_) => ClientCode::Conflict,
            ResumeError::StoreUnavailable(_) => ClientCode::Unavailable,
            ResumeError::Validation(_) => ClientCode::BadRequest,
            ResumeError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResumeError::NotFound(_) => "not_found",
            ResumeError::Conflict(_) => "conflict",
            ResumeError::StoreUnavailable(_) => "unavailable",
            ResumeError::Validation(_) => "validation",
            ResumeError::Internal(_) => "internal",
        }
    }

    /// Whether a client may reasonably retry the same request later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ResumeError::Conflict(_) | ResumeError::StoreUnavailable(_)
        )
    }
}
