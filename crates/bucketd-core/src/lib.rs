//! Core types, configuration, and hashing helpers for bucketd.
//!
//! This crate holds the pieces shared by the authenticator, the object store,
//! and the HTTP layer: the error [`ErrorCategory`] every domain error is
//! classified into, the process-wide [`BucketdConfig`], and the SHA-256 hex
//! helper used for body hashes, key namespaces, and canonical requests.

mod config;
mod error;
mod hash;

pub use config::BucketdConfig;
pub use error::{BucketdError, BucketdResult, ErrorCategory};
pub use hash::sha256_hex;
