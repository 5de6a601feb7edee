//! Path-style request routing.
//!
//! | Method + path | Route |
//! |---|---|
//! | `PUT /{bucket}` | [`Route::CreateBucket`] |
//! | `GET /{bucket}/{key...}` | [`Route::GetObject`] |
//! | `PUT /{bucket}/{key...}` | [`Route::PutObject`] |
//! | `DELETE /{bucket}/{key...}` | [`Route::DeleteObject`] |
//!
//! The key is everything after the first path segment and may contain `/`.
//! Both bucket and key are percent-decoded.

use std::fmt;

use http::Method;
use percent_encoding::percent_decode_str;

use crate::error::ApiError;

/// A resolved operation with its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Create a bucket.
    CreateBucket {
        /// Bucket name.
        bucket: String,
    },
    /// Read an object.
    GetObject {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
    /// Store an object.
    PutObject {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
    /// Delete an object.
    DeleteObject {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
}

impl Route {
    /// Operation name for logs.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::CreateBucket { .. } => "CreateBucket",
            Self::GetObject { .. } => "GetObject",
            Self::PutObject { .. } => "PutObject",
            Self::DeleteObject { .. } => "DeleteObject",
        }
    }

    /// Target bucket.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::CreateBucket { bucket }
            | Self::GetObject { bucket, .. }
            | Self::PutObject { bucket, .. }
            | Self::DeleteObject { bucket, .. } => bucket,
        }
    }

    /// Target key, for object operations.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::CreateBucket { .. } => None,
            Self::GetObject { key, .. }
            | Self::PutObject { key, .. }
            | Self::DeleteObject { key, .. } => Some(key),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

/// Resolve a request method and URI path to a [`Route`].
///
/// # Errors
///
/// Returns [`ApiError::method_not_allowed`] if the method is not served on
/// the path.
///
/// # Examples
///
/// ```
/// use bucketd_http::router::{Route, resolve};
///
/// let route = resolve(&http::Method::GET, "/photos/2024/cat.jpg").unwrap();
/// assert_eq!(
///     route,
///     Route::GetObject {
///         bucket: "photos".to_owned(),
///         key: "2024/cat.jpg".to_owned(),
///     }
/// );
/// ```
pub fn resolve(method: &Method, path: &str) -> Result<Route, ApiError> {
    let (bucket, key) = parse_path(path);

    match (method, bucket, key) {
        (&Method::PUT, Some(bucket), None) => Ok(Route::CreateBucket { bucket }),
        (&Method::GET, Some(bucket), Some(key)) => Ok(Route::GetObject { bucket, key }),
        (&Method::PUT, Some(bucket), Some(key)) => Ok(Route::PutObject { bucket, key }),
        (&Method::DELETE, Some(bucket), Some(key)) => Ok(Route::DeleteObject { bucket, key }),
        _ => Err(ApiError::method_not_allowed()),
    }
}

/// Split a path into its bucket segment and the remaining key.
fn parse_path(path: &str) -> (Option<String>, Option<String>) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return (None, None);
    }

    match trimmed.split_once('/') {
        Some((bucket, key)) if !key.is_empty() => {
            (Some(decode_uri_component(bucket)), Some(decode_uri_component(key)))
        }
        Some((bucket, _)) => (Some(decode_uri_component(bucket)), None),
        None => (Some(decode_uri_component(trimmed)), None),
    }
}

/// Decode a percent-encoded URI component.
fn decode_uri_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(bucket: &str, key: &str) -> (String, String) {
        (bucket.to_owned(), key.to_owned())
    }

    #[test]
    fn test_should_route_create_bucket() {
        assert_eq!(
            resolve(&Method::PUT, "/my-bucket").unwrap(),
            Route::CreateBucket {
                bucket: "my-bucket".to_owned()
            }
        );
        assert_eq!(
            resolve(&Method::PUT, "/my-bucket/").unwrap(),
            Route::CreateBucket {
                bucket: "my-bucket".to_owned()
            }
        );
    }

    #[test]
    fn test_should_route_object_operations() {
        let (bucket, key) = object("my-bucket", "test.txt");
        assert_eq!(
            resolve(&Method::GET, "/my-bucket/test.txt").unwrap(),
            Route::GetObject {
                bucket: bucket.clone(),
                key: key.clone()
            }
        );
        assert_eq!(
            resolve(&Method::PUT, "/my-bucket/test.txt").unwrap(),
            Route::PutObject {
                bucket: bucket.clone(),
                key: key.clone()
            }
        );
        assert_eq!(
            resolve(&Method::DELETE, "/my-bucket/test.txt").unwrap(),
            Route::DeleteObject { bucket, key }
        );
    }

    #[test]
    fn test_should_keep_slashes_in_key() {
        let route = resolve(&Method::GET, "/b/a/b/c.txt").unwrap();
        assert_eq!(route.bucket(), "b");
        assert_eq!(route.key(), Some("a/b/c.txt"));
    }

    #[test]
    fn test_should_decode_percent_encoded_key() {
        let route = resolve(&Method::PUT, "/b/hello%20world%2Bmore").unwrap();
        assert_eq!(route.key(), Some("hello world+more"));
    }

    #[test]
    fn test_should_reject_unsupported_methods() {
        for (method, path) in [
            (Method::GET, "/my-bucket"),
            (Method::DELETE, "/my-bucket"),
            (Method::POST, "/my-bucket/key"),
            (Method::HEAD, "/my-bucket/key"),
            (Method::PUT, "/"),
        ] {
            let err = resolve(&method, path).unwrap_err();
            assert_eq!(err.status, http::StatusCode::METHOD_NOT_ALLOWED, "{method} {path}");
        }
    }

    #[test]
    fn test_should_name_operations() {
        let route = resolve(&Method::DELETE, "/b/k").unwrap();
        assert_eq!(route.to_string(), "DeleteObject");
        assert_eq!(
            resolve(&Method::PUT, "/b").unwrap().key(),
            None
        );
    }
}
