//! Error types for SigV4 authentication.
//!
//! Each [`AuthError`] variant names one distinct reason a request was
//! rejected. The reasons are for logs only: every variant is classified as
//! [`ErrorCategory::Unauthorized`] and the HTTP boundary answers all of them
//! with the same generic response.

use bucketd_core::ErrorCategory;

/// Errors that can occur during AWS Signature Version 4 authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The `Authorization` header is missing or empty.
    #[error("authorization header missing")]
    MissingAuthHeader,

    /// The `Authorization` header does not start with `AWS4-HMAC-SHA256 `.
    #[error("signing algorithm not supported")]
    UnsupportedAlgorithm,

    /// The credential does not start with the configured access key.
    #[error("invalid access key")]
    InvalidAccessKey,

    /// The computed signature does not match the provided signature.
    #[error("invalid signature")]
    InvalidSignature,
}

impl AuthError {
    /// Caller-facing classification, always [`ErrorCategory::Unauthorized`].
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Unauthorized
    }
}
