//! Per-object metadata persisted next to each body.

use serde::{Deserialize, Serialize};

/// Name of the body file inside an object directory.
pub const BODY_FILE: &str = "body";

/// Name of the metadata file inside an object directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Metadata stored as JSON in `metadata.json`.
///
/// Field names are part of the on-disk layout and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Lowercase hex SHA-256 of the body.
    #[serde(rename = "content_sha256")]
    pub content_hash: String,
    /// Body length in bytes.
    pub content_size: u64,
    /// The key the object was stored under.
    pub original_key: String,
    /// Write time in unix seconds (UTC).
    pub last_modified: i64,
}

impl ObjectMetadata {
    /// Build metadata for a body about to be written under `key`.
    #[must_use]
    pub fn for_body(key: &str, body: &[u8]) -> Self {
        Self {
            content_hash: bucketd_core::sha256_hex(body),
            content_size: body.len() as u64,
            original_key: key.to_owned(),
            last_modified: chrono::Utc::now().timestamp(),
        }
    }

    /// `last_modified` as a UTC timestamp, if it is in range.
    #[must_use]
    pub fn last_modified_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.last_modified, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_serialize_with_on_disk_field_names() {
        let meta = ObjectMetadata {
            content_hash: "abc".into(),
            content_size: 3,
            original_key: "dir/file.txt".into(),
            last_modified: 1_700_000_000,
        };
        let json: serde_json::Value = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["content_sha256"], "abc");
        assert_eq!(json["content_size"], 3);
        assert_eq!(json["original_key"], "dir/file.txt");
        assert_eq!(json["last_modified"], 1_700_000_000);
    }

    #[test]
    fn test_should_read_metadata_written_by_other_implementations() {
        let raw = r#"{"content_sha256":"e3b0","content_size":0,"original_key":"k","last_modified":1}"#;
        let meta: ObjectMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(meta.content_hash, "e3b0");
        assert_eq!(meta.content_size, 0);
        assert_eq!(meta.original_key, "k");
        assert_eq!(meta.last_modified, 1);
    }

    #[test]
    fn test_should_describe_body() {
        let meta = ObjectMetadata::for_body("key", b"hello");
        assert_eq!(
            meta.content_hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(meta.content_size, 5);
        assert_eq!(meta.original_key, "key");
        assert!(meta.last_modified > 0);
        assert!(meta.last_modified_at().is_some());
    }
}
