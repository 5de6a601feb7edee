//! Content-addressed filesystem object store for bucketd.
//!
//! Objects are addressed by `(bucket, key)` and stored under
//! `<root>/<bucket>/<sha256(key)>/`, with a `body` file and a `metadata.json`
//! file recording the body checksum. Every read re-hashes the body and fails
//! with [`StoreError::IntegrityError`] on mismatch.
//!
//! Bucket names are checked against the S3 general purpose bucket naming
//! rules in [`validation`] before any filesystem access.
//!
//! # Architecture
//!
//! ```text
//! ObjectStore (create_bucket / put / get / delete)
//!        |
//!        +-- validation (bucket naming policy)
//!        +-- locks      (per-object async mutex table)
//!        +-- metadata   (metadata.json schema)
//!        v
//!   filesystem (temp file + rename)
//! ```

pub mod error;
mod locks;
pub mod metadata;
pub mod storage;
pub mod validation;

pub use error::{StoreError, StoreResult};
pub use metadata::ObjectMetadata;
pub use storage::{ObjectStore, StoredObject};
pub use validation::{BucketNameError, validate_bucket_name};
