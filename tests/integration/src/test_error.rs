//! Error handling integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;

    use crate::{create_test_bucket, s3_client, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_bucket_on_put() {
        let client = s3_client();
        let bucket = test_bucket_name("ghost");

        let err = client
            .put_object()
            .bucket(&bucket)
            .key("file.txt")
            .body(ByteStream::from_static(b"data"))
            .send()
            .await
            .expect_err("put to nonexistent bucket should fail");

        let service_err = err.into_service_error();
        assert_eq!(service_err.meta().code(), Some("NoSuchBucket"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_key_on_get() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "nokey").await;

        let err = client
            .get_object()
            .bucket(&bucket)
            .key("nonexistent.txt")
            .send()
            .await
            .expect_err("get nonexistent key should fail");

        assert!(err.into_service_error().is_no_such_key());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_no_such_key_on_repeated_delete() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "redelete").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("once.txt")
            .body(ByteStream::from_static(b"x"))
            .send()
            .await
            .expect("put_object");

        client
            .delete_object()
            .bucket(&bucket)
            .key("once.txt")
            .send()
            .await
            .expect("first delete");

        let err = client
            .delete_object()
            .bucket(&bucket)
            .key("once.txt")
            .send()
            .await
            .expect_err("second delete should fail");

        let service_err = err.into_service_error();
        assert_eq!(service_err.meta().code(), Some("NoSuchKey"));
    }
}
