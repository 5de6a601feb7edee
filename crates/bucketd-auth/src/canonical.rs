//! Canonical request construction for AWS Signature Version 4.
//!
//! The canonical request is the byte-exact signing input:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! where `CanonicalHeaders` is one `name:value\n` line per signed header, so
//! the header block is followed by an empty line.
//!
//! The path and query are taken from the raw request URI without percent
//! decoding or re-encoding, and the signed header list is used in the order
//! the client sent it. Clients must list `SignedHeaders` in lexicographic
//! order, as every SigV4 signer does; the list is not re-sorted here.

use crate::headers::RequestHeaders;

/// Build the full canonical request string.
///
/// `request_uri` is the raw request target including any query string.
/// `signed_headers` is the `SignedHeaders` value from the `Authorization`
/// header, joined with `;`.
///
/// # Examples
///
/// ```
/// use bucketd_auth::RequestHeaders;
/// use bucketd_auth::canonical::build_canonical_request;
///
/// let headers: RequestHeaders = [("host", "examplebucket.s3.amazonaws.com")]
///     .into_iter()
///     .collect();
/// let canonical = build_canonical_request(
///     "GET",
///     "/test.txt",
///     &headers,
///     "host",
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
/// );
/// assert!(canonical.starts_with("GET\n/test.txt\n\nhost:examplebucket.s3.amazonaws.com\n"));
/// ```
#[must_use]
pub fn build_canonical_request(
    method: &str,
    request_uri: &str,
    headers: &RequestHeaders,
    signed_headers: &str,
    payload_hash: &str,
) -> String {
    let canonical_uri = build_canonical_uri(request_uri);
    let canonical_query = build_canonical_query_string(request_uri);
    let signed: Vec<&str> = signed_headers.split(';').collect();
    let canonical_headers = build_canonical_headers(headers, &signed);

    format!(
        "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
    )
}

/// Build the canonical URI: the path portion of the request URI.
///
/// Everything before the first `?` is returned unchanged; an empty path is
/// normalized to `/`.
///
/// # Examples
///
/// ```
/// use bucketd_auth::canonical::build_canonical_uri;
///
/// assert_eq!(build_canonical_uri("/bucket/key?x=1"), "/bucket/key");
/// assert_eq!(build_canonical_uri(""), "/");
/// assert_eq!(build_canonical_uri("?x=1"), "/");
/// ```
#[must_use]
pub fn build_canonical_uri(request_uri: &str) -> String {
    let path = request_uri
        .split_once('?')
        .map_or(request_uri, |(path, _)| path);

    if path.is_empty() {
        "/".to_owned()
    } else {
        path.to_owned()
    }
}

/// Build the canonical query string from the request URI.
///
/// The portion after the first `?` is split on `&`, the `key=value` tokens
/// are sorted as opaque byte strings, and then rejoined with `&`. Raw token
/// bytes are preserved as-is: no decoding, no re-encoding, no splitting of
/// keys from values.
///
/// # Examples
///
/// ```
/// use bucketd_auth::canonical::build_canonical_query_string;
///
/// assert_eq!(build_canonical_query_string("/bucket"), "");
/// assert_eq!(build_canonical_query_string("/bucket?b=2&a=1"), "a=1&b=2");
/// ```
#[must_use]
pub fn build_canonical_query_string(request_uri: &str) -> String {
    let query = request_uri.split_once('?').map_or("", |(_, query)| query);

    let mut tokens: Vec<&str> = query.split('&').collect();
    tokens.sort_unstable();
    tokens.join("&")
}

/// Build the canonical header block for the signed header names.
///
/// Emits `name:value\n` for each name, in the given order, with the value
/// trimmed of surrounding whitespace. A signed header missing from `headers`
/// contributes an empty value; the resulting canonical request then cannot
/// match a signature computed over the real header.
///
/// # Examples
///
/// ```
/// use bucketd_auth::RequestHeaders;
/// use bucketd_auth::canonical::build_canonical_headers;
///
/// let headers: RequestHeaders = [("Host", "  example.com ")].into_iter().collect();
/// assert_eq!(
///     build_canonical_headers(&headers, &["host", "x-amz-date"]),
///     "host:example.com\nx-amz-date:\n"
/// );
/// ```
#[must_use]
pub fn build_canonical_headers(headers: &RequestHeaders, signed_headers: &[&str]) -> String {
    signed_headers
        .iter()
        .map(|name| {
            let value = headers.get(name).unwrap_or_default().trim();
            format!("{name}:{value}\n")
        })
        .collect()
}
