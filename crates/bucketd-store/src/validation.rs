//! Bucket naming policy.
//!
//! Implements the general purpose bucket naming rules from the
//! [Amazon S3 documentation](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html).
//! Rules are checked in a fixed order and only the first violation is
//! reported.

use std::net::Ipv4Addr;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Prefixes reserved by S3.
const RESERVED_PREFIXES: [&str; 3] = ["xn--", "sthree-", "amzn-s3-demo-"];

/// Suffixes reserved for access point, Object Lambda, directory and table
/// bucket aliases.
const RESERVED_SUFFIXES: [&str; 4] = ["-s3alias", "--ol-s3", "--x-s3", "--table-s3"];

/// A violated bucket naming rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BucketNameError {
    /// Shorter than 3 bytes.
    #[error("bucket name must be at least 3 characters long")]
    TooShort,

    /// Longer than 63 bytes.
    #[error("bucket name must be not longer than 63 characters")]
    TooLong,

    /// Contains something other than lowercase ASCII letters, digits, `.` or `-`.
    #[error("bucket name can consist only of lowercase letters, numbers, periods and hyphens")]
    InvalidCharacter,

    /// Starts with `.` or `-`.
    #[error("bucket name must begin with a letter or number")]
    InvalidStart,

    /// Ends with `.` or `-`.
    #[error("bucket name must end with a letter or number")]
    InvalidEnd,

    /// Contains `..`.
    #[error("bucket name can not contain two adjacent periods")]
    AdjacentPeriods,

    /// Parses as a dotted-decimal IPv4 address.
    #[error("bucket name can not be formatted as an IP address")]
    IpAddress,

    /// Starts with a reserved prefix.
    #[error("bucket name can not begin with the prefix: '{0}'")]
    ReservedPrefix(&'static str),

    /// Ends with a reserved suffix.
    #[error("bucket name can not end with the suffix: '{0}'")]
    ReservedSuffix(&'static str),
}

/// Validate a bucket name.
///
/// Rules, in the order they are checked:
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must begin with a letter or number
/// - Must end with a letter or number
/// - No adjacent dots (`..`)
/// - Not formatted as an IPv4 address (e.g. `192.168.5.4`)
/// - Must not start with `xn--`, `sthree-` or `amzn-s3-demo-`
/// - Must not end with `-s3alias`, `--ol-s3`, `--x-s3` or `--table-s3`
///
/// # Errors
///
/// Returns the [`BucketNameError`] for the first rule the name violates.
///
/// # Examples
///
/// ```
/// use bucketd_store::validation::{BucketNameError, validate_bucket_name};
///
/// assert!(validate_bucket_name("my-valid-bucket").is_ok());
/// assert_eq!(validate_bucket_name("ab"), Err(BucketNameError::TooShort));
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), BucketNameError> {
    let len = name.len();

    if len < MIN_BUCKET_NAME_LEN {
        return Err(BucketNameError::TooShort);
    }
    if len > MAX_BUCKET_NAME_LEN {
        return Err(BucketNameError::TooLong);
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(BucketNameError::InvalidCharacter);
    }

    // Only ASCII remains, so byte indexing is safe.
    let bytes = name.as_bytes();
    if !is_letter_or_digit(bytes[0]) {
        return Err(BucketNameError::InvalidStart);
    }
    if !is_letter_or_digit(bytes[len - 1]) {
        return Err(BucketNameError::InvalidEnd);
    }

    if name.contains("..") {
        return Err(BucketNameError::AdjacentPeriods);
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(BucketNameError::IpAddress);
    }

    if let Some(prefix) = RESERVED_PREFIXES.into_iter().find(|p| name.starts_with(p)) {
        return Err(BucketNameError::ReservedPrefix(prefix));
    }

    if let Some(suffix) = RESERVED_SUFFIXES.into_iter().find(|s| name.ends_with(s)) {
        return Err(BucketNameError::ReservedSuffix(suffix));
    }

    Ok(())
}

fn is_letter_or_digit(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}
