//! The bucketd HTTP service implementing hyper's `Service` trait.
//!
//! [`BucketdService`] ties together routing, payload hashing, authentication,
//! dispatch and response serialization. Each request goes through:
//!
//! 1. Health check interception (`GET /`, `GET /health`), unauthenticated
//! 2. Path-style routing via [`resolve`]
//! 3. Request body collection
//! 4. `x-amz-content-sha256` verification against the body
//! 5. SigV4 authentication
//! 6. Dispatch to the [`ObjectStore`]
//! 7. Common response headers (`x-amz-request-id`, `Server`)

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use bucketd_auth::{Authenticator, RequestHeaders};
use bucketd_core::ErrorCategory;
use bucketd_store::ObjectStore;
use bytes::Bytes;
use http::uri::PathAndQuery;
use http_body_util::BodyExt;
use hyper::service::Service;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::body::ResponseBody;
use crate::dispatch::dispatch_operation;
use crate::error::ApiError;
use crate::response::error_to_response;
use crate::router::resolve;

/// Value of the `Server` response header.
const SERVER_NAME: &str = "bucketd";

/// The bucketd HTTP service.
///
/// Cheap to clone; one clone is handed to every connection.
#[derive(Debug, Clone)]
pub struct BucketdService {
    store: ObjectStore,
    authenticator: Authenticator,
}

impl BucketdService {
    /// Create a service serving `store`, guarded by `authenticator`.
    #[must_use]
    pub fn new(store: ObjectStore, authenticator: Authenticator) -> Self {
        Self {
            store,
            authenticator,
        }
    }

    /// Process a request through the full pipeline.
    async fn process_request<B>(
        &self,
        req: http::Request<B>,
        request_id: &str,
    ) -> http::Response<ResponseBody>
    where
        B: http_body::Body,
        B::Error: fmt::Display,
    {
        let method = req.method().clone();
        let uri = req.uri().clone();
        debug!(%method, %uri, request_id, "processing request");

        // 1. Health check interception.
        if is_health_check(&method, uri.path()) {
            return health_check_response();
        }

        // 2. Route.
        let route = match resolve(&method, uri.path()) {
            Ok(route) => route,
            Err(err) => {
                warn!(%method, %uri, error = %err, request_id, "failed to route request");
                return error_to_response(&err, request_id);
            }
        };

        info!(
            operation = %route,
            bucket = route.bucket(),
            key = ?route.key(),
            request_id,
            "routed request"
        );

        // 3. Collect body.
        let (parts, incoming) = req.into_parts();
        let body = match incoming.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(err) => {
                warn!(error = %err, request_id, "failed to collect request body");
                return error_to_response(&ApiError::unreadable_body(), request_id);
            }
        };

        // 4. Verify the payload hash.
        let headers = RequestHeaders::from_parts(&parts);
        let body_hash = match verify_content_sha256(&headers, &body) {
            Ok(hash) => hash,
            Err(err) => {
                warn!(error = %err, request_id, "rejected payload hash");
                return error_to_response(&err, request_id);
            }
        };

        // 5. Authenticate against the raw request target.
        let request_uri = parts
            .uri
            .path_and_query()
            .map_or("/", PathAndQuery::as_str);
        if let Err(auth_err) =
            self.authenticator
                .validate(method.as_str(), request_uri, &headers, &body_hash)
        {
            warn!(reason = %auth_err, request_id, "authentication failed");
            return error_to_response(&ApiError::unauthorized(), request_id);
        }

        // 6. Dispatch.
        match dispatch_operation(&self.store, route, body).await {
            Ok(response) => response,
            Err(err) => {
                if err.category() == ErrorCategory::Internal {
                    error!(error = %format_args!("{err:#}"), request_id, "operation failed");
                } else {
                    debug!(
                        error = %err,
                        category = %err.category(),
                        request_id,
                        "operation rejected"
                    );
                }
                error_to_response(&ApiError::from(&err), request_id)
            }
        }
    }
}

impl<B> Service<http::Request<B>> for BucketdService
where
    B: http_body::Body + Send + 'static,
    B::Data: Send,
    B::Error: fmt::Display + Send,
{
    type Response = http::Response<ResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let service = self.clone();

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();
            let response = service.process_request(req, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Check `x-amz-content-sha256` against the body and return the body hash.
///
/// The header is mandatory and must equal the lowercase hex SHA-256 of the
/// exact body bytes.
fn verify_content_sha256(headers: &RequestHeaders, body: &Bytes) -> Result<String, ApiError> {
    let claimed = headers
        .get("x-amz-content-sha256")
        .filter(|value| !value.is_empty())
        .ok_or_else(ApiError::missing_content_sha256)?;

    let actual = bucketd_core::sha256_hex(body);
    if claimed != actual {
        return Err(ApiError::content_sha256_mismatch());
    }
    Ok(actual)
}

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && (path == "/" || path == "/health")
}

/// Produce a health check response.
fn health_check_response() -> http::Response<ResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "text/plain")
        .body(ResponseBody::from_bytes(Bytes::from_static(b"healthy")))
        .expect("static health response should be valid")
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<ResponseBody>,
    request_id: &str,
) -> http::Response<ResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-amz-request-id", hv);
    }
    headers.insert(
        http::header::SERVER,
        http::header::HeaderValue::from_static(SERVER_NAME),
    );

    response
}
