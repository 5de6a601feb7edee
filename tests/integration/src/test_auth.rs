//! Authentication integration tests.

#[cfg(test)]
mod tests {
    use crate::{s3_client_with, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_wrong_secret() {
        let access_key = std::env::var("ACCESS_KEY").unwrap_or_else(|_| "test".to_owned());
        let client = s3_client_with(&access_key, "definitely-not-the-secret");

        let err = client
            .create_bucket()
            .bucket(test_bucket_name("badsig"))
            .send()
            .await
            .expect_err("wrong secret should be rejected");

        let service_err = err.into_service_error();
        assert_eq!(service_err.meta().code(), Some("AccessDenied"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unknown_access_key() {
        let client = s3_client_with("UNKNOWNKEY", "whatever");

        let err = client
            .create_bucket()
            .bucket(test_bucket_name("badkey"))
            .send()
            .await
            .expect_err("unknown access key should be rejected");

        let service_err = err.into_service_error();
        assert_eq!(service_err.meta().code(), Some("AccessDenied"));
    }
}
