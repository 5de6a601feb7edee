//! Object put/get/delete integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;

    use crate::{create_test_bucket, s3_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_put_and_get_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "putget").await;

        let body = b"hello, bucketd!";
        client
            .put_object()
            .bucket(&bucket)
            .key("greeting.txt")
            .body(ByteStream::from_static(body))
            .send()
            .await
            .expect("put_object");

        let resp = client
            .get_object()
            .bucket(&bucket)
            .key("greeting.txt")
            .send()
            .await
            .expect("get_object");

        assert_eq!(resp.content_length(), Some(15));
        assert!(resp.last_modified().is_some());

        let data = resp
            .body
            .collect()
            .await
            .expect("collect body")
            .into_bytes();
        assert_eq!(data.as_ref(), body);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_overwrite_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "overwrite").await;

        for content in [&b"first"[..], &b"second version"[..]] {
            client
                .put_object()
                .bucket(&bucket)
                .key("file.txt")
                .body(ByteStream::from(content.to_vec()))
                .send()
                .await
                .expect("put_object");
        }

        let data = client
            .get_object()
            .bucket(&bucket)
            .key("file.txt")
            .send()
            .await
            .expect("get_object")
            .body
            .collect()
            .await
            .expect("collect body")
            .into_bytes();
        assert_eq!(data.as_ref(), b"second version");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_store_nested_key() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "nested").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("a/b/c.txt")
            .body(ByteStream::from_static(b"deep"))
            .send()
            .await
            .expect("put_object");

        let data = client
            .get_object()
            .bucket(&bucket)
            .key("a/b/c.txt")
            .send()
            .await
            .expect("get_object")
            .body
            .collect()
            .await
            .expect("collect body")
            .into_bytes();
        assert_eq!(data.as_ref(), b"deep");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "delete").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("doomed.txt")
            .body(ByteStream::from_static(b"bye"))
            .send()
            .await
            .expect("put_object");

        client
            .delete_object()
            .bucket(&bucket)
            .key("doomed.txt")
            .send()
            .await
            .expect("delete_object");

        let err = client
            .get_object()
            .bucket(&bucket)
            .key("doomed.txt")
            .send()
            .await
            .expect_err("get after delete should fail");

        assert!(err.into_service_error().is_no_such_key());
    }
}
