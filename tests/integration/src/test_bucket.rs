//! Bucket creation integration tests.

#[cfg(test)]
mod tests {
    use crate::{create_test_bucket, s3_client, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_bucket() {
        let client = s3_client();
        let bucket = test_bucket_name("create");

        let resp = client
            .create_bucket()
            .bucket(&bucket)
            .send()
            .await
            .expect("create_bucket");

        assert_eq!(resp.location(), Some(format!("/{bucket}").as_str()));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_duplicate_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "dup").await;

        let err = client
            .create_bucket()
            .bucket(&bucket)
            .send()
            .await
            .expect_err("second create should fail");

        let service_err = err.into_service_error();
        assert_eq!(service_err.meta().code(), Some("BucketAlreadyExists"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_invalid_bucket_name() {
        let client = s3_client();

        let err = client
            .create_bucket()
            .bucket("xn--reserved-prefix")
            .send()
            .await
            .expect_err("reserved prefix should be rejected");

        let service_err = err.into_service_error();
        assert_eq!(service_err.meta().code(), Some("InvalidBucketName"));
    }
}
