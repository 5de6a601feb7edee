//! Process configuration for bucketd.
//!
//! Provides [`BucketdConfig`], loaded once at startup from environment
//! variables. The credential pair is held here only until the server hands it
//! to the authenticator; nothing reads it through global state.

use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{BucketdError, BucketdResult};

/// bucketd server configuration.
///
/// # Examples
///
/// ```
/// use bucketd_core::BucketdConfig;
///
/// let config = BucketdConfig::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:8000");
/// assert_eq!(config.data_dir, "./data");
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BucketdConfig {
    /// Bind address for the HTTP listener (e.g. `"0.0.0.0:8000"`).
    #[builder(default = String::from("0.0.0.0:8000"))]
    pub gateway_listen: String,

    /// Root directory of the object store.
    #[builder(default = String::from("./data"))]
    pub data_dir: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Access key ID clients must sign with.
    #[builder(default)]
    pub access_key: String,

    /// Secret key paired with [`access_key`](Self::access_key).
    #[serde(default, skip_serializing)]
    #[builder(default)]
    pub secret_key: String,
}

impl fmt::Debug for BucketdConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketdConfig")
            .field("gateway_listen", &self.gateway_listen)
            .field("data_dir", &self.data_dir)
            .field("log_level", &self.log_level)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Default for BucketdConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:8000"),
            data_dir: String::from("./data"),
            log_level: String::from("info"),
            access_key: String::new(),
            secret_key: String::new(),
        }
    }
}

impl BucketdConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:8000` |
    /// | `DATA_DIR` | `./data` |
    /// | `LOG_LEVEL` | `info` |
    /// | `ACCESS_KEY` | *(empty)* |
    /// | `SECRET_KEY` | *(empty)* |
    ///
    /// Missing credentials are not an error here; call
    /// [`validate`](Self::validate) before serving.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("DATA_DIR") {
            config.data_dir = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("ACCESS_KEY") {
            config.access_key = v;
        }
        if let Ok(v) = std::env::var("SECRET_KEY") {
            config.secret_key = v;
        }

        config
    }

    /// Check that the configuration can be served.
    ///
    /// # Errors
    ///
    /// Returns [`BucketdError::Config`] naming the first missing credential
    /// variable or an empty data directory.
    pub fn validate(&self) -> BucketdResult<()> {
        if self.access_key.is_empty() {
            return Err(BucketdError::Config(
                "environment variable 'ACCESS_KEY' is missing".to_owned(),
            ));
        }
        if self.secret_key.is_empty() {
            return Err(BucketdError::Config(
                "environment variable 'SECRET_KEY' is missing".to_owned(),
            ));
        }
        if self.data_dir.is_empty() {
            return Err(BucketdError::Config("data directory is empty".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = BucketdConfig::default();
        assert_eq!(config.gateway_listen, "0.0.0.0:8000");
        assert_eq!(config.data_dir, "./data");
        assert_eq!(config.log_level, "info");
        assert!(config.access_key.is_empty());
        assert!(config.secret_key.is_empty());
    }

    #[test]
    fn test_should_load_from_env() {
        let config = BucketdConfig::from_env();
        assert!(!config.gateway_listen.is_empty());
    }

    #[test]
    fn test_should_build_with_typed_builder() {
        let config = BucketdConfig::builder()
            .gateway_listen("127.0.0.1:9999".into())
            .data_dir("/tmp/data".into())
            .log_level("debug".into())
            .access_key("AKID".into())
            .secret_key("secret".into())
            .build();

        assert_eq!(config.gateway_listen, "127.0.0.1:9999");
        assert_eq!(config.data_dir, "/tmp/data");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.access_key, "AKID");
        assert_eq!(config.secret_key, "secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_should_reject_missing_credentials() {
        let config = BucketdConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ACCESS_KEY"));

        let config = BucketdConfig::builder().access_key("AKID".into()).build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn test_should_redact_secret_in_debug_output() {
        let config = BucketdConfig::builder()
            .access_key("AKID".into())
            .secret_key("super-secret".into())
            .build();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("AKID"));
        assert!(!debug_str.contains("super-secret"));
    }

    #[test]
    fn test_should_not_serialize_secret_key() {
        let config = BucketdConfig::builder()
            .secret_key("super-secret".into())
            .build();
        let json = serde_json::to_string(&config).expect("test serialization");
        assert!(json.contains("gatewayListen"));
        assert!(json.contains("dataDir"));
        assert!(!json.contains("super-secret"));
    }
}
