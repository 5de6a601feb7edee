//! Dispatch of an authenticated, routed request to the object store.

use bucketd_store::{ObjectStore, StoreError};
use bytes::Bytes;
use tracing::debug;

use crate::body::ResponseBody;
use crate::response::{
    create_bucket_response, delete_object_response, get_object_response, put_object_response,
};
use crate::router::Route;

/// Run `route` against `store`, producing the success response.
///
/// `body` is only consumed by [`Route::PutObject`].
///
/// # Errors
///
/// Propagates the [`StoreError`] of the underlying store operation.
pub async fn dispatch_operation(
    store: &ObjectStore,
    route: Route,
    body: Bytes,
) -> Result<http::Response<ResponseBody>, StoreError> {
    debug!(
        operation = %route,
        bucket = route.bucket(),
        key = ?route.key(),
        "dispatching operation"
    );

    match route {
        Route::CreateBucket { bucket } => {
            store.create_bucket(&bucket).await?;
            Ok(create_bucket_response(&bucket))
        }
        Route::PutObject { bucket, key } => {
            store.put_object(&bucket, &key, body).await?;
            Ok(put_object_response())
        }
        Route::GetObject { bucket, key } => {
            let object = store.get_object(&bucket, &key).await?;
            Ok(get_object_response(object.body, &object.metadata))
        }
        Route::DeleteObject { bucket, key } => {
            store.delete_object(&bucket, &key).await?;
            Ok(delete_object_response())
        }
    }
}
