//! Lowercased request header map.
//!
//! Header names are case-folded once, on insertion, so canonicalization can
//! look them up by their lowercase name without folding again.

use std::collections::BTreeMap;

/// Request headers keyed by lowercase name.
///
/// Holds one value per name. Inserting a name that differs from an existing
/// one only by case replaces the earlier value.
///
/// # Examples
///
/// ```
/// use bucketd_auth::RequestHeaders;
///
/// let mut headers = RequestHeaders::new();
/// headers.insert("X-Amz-Date", "20130524T000000Z");
/// assert_eq!(headers.get("x-amz-date"), Some("20130524T000000Z"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    inner: BTreeMap<String, String>,
}

impl RequestHeaders {
    /// Create an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the header map from HTTP request parts.
    ///
    /// The first value of each header is kept. Values that are not valid
    /// UTF-8 are decoded lossily. When the request has no `Host` header
    /// (HTTP/2 carries it as the `:authority` pseudo-header), the URI
    /// authority is used instead.
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        let mut headers = Self::new();
        for name in parts.headers.keys() {
            if let Some(value) = parts.headers.get(name) {
                headers.insert(
                    name.as_str(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                );
            }
        }

        if !headers.contains("host") {
            if let Some(authority) = parts.uri.authority() {
                headers.insert("host", authority.as_str());
            }
        }

        headers
    }

    /// Insert a header, lowercasing its name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.inner
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Look up a header by its lowercase name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Whether a header with the given lowercase name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RequestHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}
