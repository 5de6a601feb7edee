//! HTTP layer for bucketd.
//!
//! This crate is the glue between the network and the two core crates:
//!
//! - **Routing** ([`router`]): maps path-style requests to bucket and object
//!   operations.
//! - **Errors** ([`error`]): [`ApiError`](error::ApiError), the only place a
//!   domain error category becomes an HTTP status code.
//! - **Responses** ([`response`]): success responses and S3 error XML.
//! - **Dispatch** ([`dispatch`]): runs a routed operation against the
//!   [`ObjectStore`](bucketd_store::ObjectStore).
//! - **Service** ([`service`]): [`BucketdService`](service::BucketdService),
//!   the hyper `Service` that ties the pipeline together.
//! - **Body** ([`body`]): the [`ResponseBody`](body::ResponseBody) type.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> BucketdService (hyper Service)
//!     -> Health check interception
//!     -> resolve (path-style routing)
//!     -> Body collection + x-amz-content-sha256 check
//!     -> SigV4 authentication (bucketd-auth)
//!     -> dispatch_operation (bucketd-store)
//!     -> Common response headers (x-amz-request-id, Server)
//!   <- HTTP Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bucketd_auth::{Authenticator, Credentials};
//! use bucketd_http::BucketdService;
//! use bucketd_store::ObjectStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ObjectStore::open("./data").await?;
//! let authenticator = Authenticator::new(Arc::new(Credentials::new("AKID", "secret")));
//! let service = BucketdService::new(store, authenticator);
//! // Use `service` with a hyper connection builder.
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod dispatch;
pub mod error;
pub mod response;
pub mod router;
pub mod service;

pub use body::ResponseBody;
pub use error::ApiError;
pub use router::Route;
pub use service::BucketdService;
