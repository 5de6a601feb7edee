//! Error classification shared by every bucketd component.

use std::fmt;

/// Caller-facing classification of a domain error.
///
/// Domain errors carry a category rather than a transport status code. Only the
/// HTTP boundary maps a category to a concrete status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request itself is malformed or violates a policy.
    BadRequest,
    /// The addressed bucket or object does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// The request could not be authenticated.
    Unauthorized,
    /// The server failed to complete a well-formed request.
    Internal,
}

impl ErrorCategory {
    /// Short, stable name of the category, suitable for logs and metrics labels.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type for bucketd infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum BucketdError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for bucketd infrastructure.
pub type BucketdResult<T> = Result<T, BucketdError>;
