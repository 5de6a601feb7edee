//! Wire-level errors returned to clients.
//!
//! [`ApiError`] carries an S3 error code, a client-safe message and the HTTP
//! status. Domain errors are converted here, at the boundary; this is the only
//! place an [`ErrorCategory`] becomes a status code.

use bucketd_core::ErrorCategory;
use bucketd_store::StoreError;
use http::StatusCode;

/// An error response to be rendered as S3 error XML.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// S3 error code, e.g. `NoSuchBucket`.
    pub code: &'static str,
    /// Human-readable message safe to show the client.
    pub message: String,
    /// HTTP status code.
    pub status: StatusCode,
}

impl ApiError {
    fn new(code: &'static str, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code,
            message: message.into(),
            status,
        }
    }

    /// Generic authentication failure. The reason is never disclosed.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(
            "AccessDenied",
            "unauthorized",
            status_for(ErrorCategory::Unauthorized),
        )
    }

    /// The method is not supported on this path.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(
            "MethodNotAllowed",
            "method not allowed",
            StatusCode::METHOD_NOT_ALLOWED,
        )
    }

    /// The `x-amz-content-sha256` header is absent.
    #[must_use]
    pub fn missing_content_sha256() -> Self {
        Self::new(
            "InvalidRequest",
            "header x-amz-content-sha256 is missing",
            status_for(ErrorCategory::BadRequest),
        )
    }

    /// The `x-amz-content-sha256` header does not match the body.
    #[must_use]
    pub fn content_sha256_mismatch() -> Self {
        Self::new(
            "XAmzContentSHA256Mismatch",
            "content hash mismatch",
            status_for(ErrorCategory::BadRequest),
        )
    }

    /// The request body could not be read.
    #[must_use]
    pub fn unreadable_body() -> Self {
        Self::new(
            "IncompleteBody",
            "could not read request body",
            status_for(ErrorCategory::BadRequest),
        )
    }

    /// Opaque server-side failure.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            "InternalError",
            "internal server error",
            status_for(ErrorCategory::Internal),
        )
    }
}

impl From<&StoreError> for ApiError {
    fn from(err: &StoreError) -> Self {
        let status = status_for(err.category());
        match err {
            StoreError::InvalidBucketName(rule) => {
                Self::new("InvalidBucketName", rule.to_string(), status)
            }
            StoreError::BucketAlreadyExists { .. } => Self::new(
                "BucketAlreadyExists",
                "requested bucket name is not available",
                status,
            ),
            StoreError::BucketNotFound { .. } => {
                Self::new("NoSuchBucket", "requested bucket does not exist", status)
            }
            StoreError::ObjectNotFound { .. } => Self::new(
                "NoSuchKey",
                "object under requested key does not exist",
                status,
            ),
            StoreError::IntegrityError { .. } | StoreError::Internal(_) => Self::internal(),
        }
    }
}

/// Map an error category to its HTTP status code.
#[must_use]
pub fn status_for(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Conflict => StatusCode::CONFLICT,
        ErrorCategory::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
