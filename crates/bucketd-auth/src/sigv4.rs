//! AWS Signature Version 4 verification.
//!
//! Verification proceeds in four steps:
//!
//! 1. Parse the `Authorization` header into the credential scope, signed
//!    header list, and provided signature.
//! 2. Rebuild the canonical request from the request method, raw URI, headers
//!    and payload hash.
//! 3. Build the string to sign and derive the signing key by folding
//!    HMAC-SHA256 over the credential scope components.
//! 4. Compare the expected signature with the provided one in constant time.
//!
//! The main entry point is [`Authenticator::validate`].

use std::sync::Arc;

use hmac::{Hmac, KeyInit, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::build_canonical_request;
use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::headers::RequestHeaders;

/// The only signing algorithm accepted.
pub const SIGNING_ALGORITHM: &str = "AWS4-HMAC-SHA256";

type HmacSha256 = Hmac<Sha256>;

/// Components extracted from an `Authorization` header.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256 Credential=AKID/20130524/us-east-1/s3/aws4_request,
///   SignedHeaders=host;x-amz-content-sha256;x-amz-date,
///   Signature=<hex-signature>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuthorization {
    /// Everything after `<accessKey>/` in the credential, e.g.
    /// `20130524/us-east-1/s3/aws4_request`.
    pub credential_scope: String,
    /// The `SignedHeaders` value, `;`-joined. Empty when absent.
    pub signed_headers: String,
    /// The hex-encoded signature. Empty when absent.
    pub signature: String,
}

/// Verifies SigV4-signed requests against a single credential pair.
///
/// Cheap to clone; the credentials are shared.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Arc<Credentials>,
}

impl Authenticator {
    /// Create an authenticator for the given credentials.
    #[must_use]
    pub fn new(credentials: Arc<Credentials>) -> Self {
        Self { credentials }
    }

    /// The configured credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Parse an `Authorization` header value.
    ///
    /// After the algorithm prefix the value is split on `,`; each field is
    /// trimmed and split on its first `=`. Fields without `=` and unknown
    /// field names are ignored. A missing `SignedHeaders` or `Signature`
    /// field yields an empty string, which then fails signature comparison.
    ///
    /// # Errors
    ///
    /// - [`AuthError::UnsupportedAlgorithm`] if the value does not start with
    ///   `AWS4-HMAC-SHA256 `.
    /// - [`AuthError::InvalidAccessKey`] if there is no `Credential` field or
    ///   it does not start with the configured access key followed by `/`.
    pub fn parse_authorization_header(
        &self,
        header: &str,
    ) -> Result<ParsedAuthorization, AuthError> {
        let rest = header
            .strip_prefix(SIGNING_ALGORITHM)
            .and_then(|rest| rest.strip_prefix(' '))
            .ok_or(AuthError::UnsupportedAlgorithm)?;

        let mut credential = None;
        let mut signed_headers = String::new();
        let mut signature = String::new();

        for field in rest.split(',') {
            let Some((name, value)) = field.trim().split_once('=') else {
                continue;
            };
            match name {
                "Credential" => credential = Some(value),
                "SignedHeaders" => value.clone_into(&mut signed_headers),
                "Signature" => value.clone_into(&mut signature),
                _ => {}
            }
        }

        let credential_scope = credential
            .and_then(|credential| credential.strip_prefix(self.credentials.access_key_id()))
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or(AuthError::InvalidAccessKey)?;

        Ok(ParsedAuthorization {
            credential_scope: credential_scope.to_owned(),
            signed_headers,
            signature,
        })
    }

    /// Verify a signed request.
    ///
    /// `request_uri` is the raw request target (path plus optional query).
    /// `body_hash` is the lowercase hex SHA-256 of the payload, which the
    /// caller has already checked against `x-amz-content-sha256`.
    ///
    /// The request timestamp is read from `x-amz-date`; it is not compared
    /// with the current time.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingAuthHeader`] if `authorization` is absent or empty.
    /// - [`AuthError::UnsupportedAlgorithm`] or [`AuthError::InvalidAccessKey`]
    ///   as described in [`parse_authorization_header`](Self::parse_authorization_header).
    /// - [`AuthError::InvalidSignature`] if the recomputed signature differs
    ///   from the provided one.
    pub fn validate(
        &self,
        method: &str,
        request_uri: &str,
        headers: &RequestHeaders,
        body_hash: &str,
    ) -> Result<(), AuthError> {
        let auth_header = headers
            .get("authorization")
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingAuthHeader)?;

        let parsed = self.parse_authorization_header(auth_header)?;

        debug!(
            scope = %parsed.credential_scope,
            signed_headers = %parsed.signed_headers,
            "verifying SigV4 signature"
        );

        let canonical_request = build_canonical_request(
            method,
            request_uri,
            headers,
            &parsed.signed_headers,
            body_hash,
        );
        let canonical_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        debug!(canonical_request_hash = %canonical_hash, "built canonical request");

        let timestamp = headers.get("x-amz-date").unwrap_or_default();
        let string_to_sign =
            build_string_to_sign(timestamp, &parsed.credential_scope, &canonical_hash);

        let signing_key =
            derive_signing_key(self.credentials.secret_key(), &parsed.credential_scope);
        let expected = compute_signature(&signing_key, &string_to_sign);

        if !bool::from(expected.as_bytes().ct_eq(parsed.signature.as_bytes())) {
            debug!("signature mismatch");
            return Err(AuthError::InvalidSignature);
        }

        debug!("SigV4 signature verified");
        Ok(())
    }
}

/// Build the SigV4 string to sign.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256\n
/// <x-amz-date>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
///
/// # Examples
///
/// ```
/// use bucketd_auth::sigv4::build_string_to_sign;
///
/// let sts = build_string_to_sign(
///     "20130524T000000Z",
///     "20130524/us-east-1/s3/aws4_request",
///     "7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972",
/// );
/// assert!(sts.starts_with("AWS4-HMAC-SHA256\n20130524T000000Z\n"));
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{SIGNING_ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Derive the signing key from the secret and credential scope.
///
/// Starts from `"AWS4" + secret_key` and folds HMAC-SHA256 over each
/// `/`-separated scope component in order. For the usual four-part scope
/// this is the standard `date -> region -> service -> aws4_request` chain.
///
/// # Examples
///
/// ```
/// use bucketd_auth::sigv4::derive_signing_key;
///
/// let key = derive_signing_key(
///     "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
///     "20130524/us-east-1/s3/aws4_request",
/// );
/// assert_eq!(key.len(), 32);
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, credential_scope: &str) -> Vec<u8> {
    credential_scope
        .split('/')
        .fold(format!("AWS4{secret_key}").into_bytes(), |key, part| {
            hmac_sha256(&key, part.as_bytes())
        })
}

/// Compute the hex-encoded HMAC-SHA256 of `data` under `signing_key`.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}

/// Compute HMAC-SHA256.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
