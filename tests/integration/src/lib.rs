//! Integration tests for the bucketd server.
//!
//! These tests require a running bucketd server, by default at
//! `localhost:8000`, started with the same `ACCESS_KEY` / `SECRET_KEY` the
//! tests sign with. They are marked `#[ignore]` so they don't run during
//! normal `cargo test`.
//!
//! Run them with:
//! ```text
//! ACCESS_KEY=test SECRET_KEY=test cargo test -p bucketd-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::config::RequestChecksumCalculation;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8000".to_owned())
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Create an S3 client signing with the given key pair.
#[must_use]
pub fn s3_client_with(access_key: &str, secret_key: &str) -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new(access_key, secret_key, None, None, "integration-test");

    // The server only accepts a plain hex payload hash, not aws-chunked
    // bodies with trailing checksums.
    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Create an S3 client signing with `ACCESS_KEY` / `SECRET_KEY`.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    s3_client_with(&env_or("ACCESS_KEY", "test"), &env_or("SECRET_KEY", "test"))
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket and return its name.
///
/// Buckets are never removed; the server has no bucket deletion.
pub async fn create_test_bucket(client: &aws_sdk_s3::Client, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

mod test_auth;
mod test_bucket;
mod test_error;
mod test_object;
