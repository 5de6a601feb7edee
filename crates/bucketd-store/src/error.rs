//! Object store error types.
//!
//! Defines [`StoreError`], covering every failure the store can report. Each
//! variant is classified by [`StoreError::category`]; mapping a category to a
//! transport status code is left to the caller.
//!
//! # Usage
//!
//! ```
//! use bucketd_core::ErrorCategory;
//! use bucketd_store::error::StoreError;
//!
//! let err = StoreError::BucketNotFound {
//!     bucket: "my-bucket".to_owned(),
//! };
//! assert_eq!(err.category(), ErrorCategory::NotFound);
//! ```

use bucketd_core::ErrorCategory;

use crate::validation::BucketNameError;

/// Object store error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The bucket name violates the naming policy.
    #[error(transparent)]
    InvalidBucketName(#[from] BucketNameError),

    /// The bucket already exists.
    #[error("requested bucket name is not available: {bucket}")]
    BucketAlreadyExists {
        /// The bucket name that already exists.
        bucket: String,
    },

    /// The bucket does not exist.
    #[error("requested bucket does not exist: {bucket}")]
    BucketNotFound {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// No object is stored under the key.
    #[error("object under requested key does not exist: {key}")]
    ObjectNotFound {
        /// The bucket that was searched.
        bucket: String,
        /// The key that was not found.
        key: String,
    },

    /// The stored body no longer hashes to the checksum recorded in its
    /// metadata.
    #[error("content checksum mismatch for {bucket}/{key}")]
    IntegrityError {
        /// The bucket holding the object.
        bucket: String,
        /// The object key.
        key: String,
        /// Checksum recorded at write time.
        expected: String,
        /// Checksum of the body read back.
        actual: String,
    },

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl StoreError {
    /// Caller-facing classification of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidBucketName(_) => ErrorCategory::BadRequest,
            Self::BucketAlreadyExists { .. } => ErrorCategory::Conflict,
            Self::BucketNotFound { .. } | Self::ObjectNotFound { .. } => ErrorCategory::NotFound,
            Self::IntegrityError { .. } | Self::Internal(_) => ErrorCategory::Internal,
        }
    }
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
