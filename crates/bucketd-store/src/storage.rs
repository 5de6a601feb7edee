//! Content-addressed filesystem object store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<bucket>/<sha256(key)>/body
//! <root>/<bucket>/<sha256(key)>/metadata.json
//! ```
//!
//! Object keys never become path components; only their SHA-256 hex digest
//! does. Bucket names are checked against the naming policy before they touch
//! the filesystem.
//!
//! Each file is written to a uniquely named sibling and renamed into place,
//! and operations on the same object are serialized through an in-process
//! lock table, so readers always see a matching metadata/body pair.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::locks::{KeyGuard, KeyLocks};
use crate::metadata::{BODY_FILE, METADATA_FILE, ObjectMetadata};
use crate::validation::validate_bucket_name;

/// An object read back from the store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// The object body, verified against its metadata checksum.
    pub body: Bytes,
    /// The object's metadata.
    pub metadata: ObjectMetadata,
}

/// Filesystem-backed object store bound to a root directory.
///
/// Cheap to clone; clones share the lock table.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    root: PathBuf,
    locks: KeyLocks,
}

impl ObjectStore {
    /// Open a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] if `root` does not exist or is not a
    /// directory.
    pub async fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        let meta = tokio::fs::metadata(&root)
            .await
            .with_context(|| format!("path '{}' does not exist", root.display()))?;
        if !meta.is_dir() {
            return Err(anyhow::anyhow!("path '{}' is not a directory", root.display()).into());
        }

        info!(root = %root.display(), "opened object store");
        Ok(Self {
            root,
            locks: KeyLocks::default(),
        })
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a bucket.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidBucketName`] if `name` violates the naming policy.
    /// - [`StoreError::BucketAlreadyExists`] if the bucket directory exists.
    pub async fn create_bucket(&self, name: &str) -> StoreResult<()> {
        validate_bucket_name(name)?;

        match tokio::fs::create_dir(self.root.join(name)).await {
            Ok(()) => {
                info!(bucket = name, "created bucket");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::BucketAlreadyExists {
                bucket: name.to_owned(),
            }),
            Err(e) => Err(anyhow::Error::new(e)
                .context("failed to create bucket directory")
                .into()),
        }
    }

    /// Store `body` under `(bucket, key)`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// - [`StoreError::BucketNotFound`] if the bucket does not exist.
    /// - [`StoreError::Internal`] on I/O failure.
    pub async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> StoreResult<()> {
        let bucket_dir = self.bucket_dir(bucket).await?;
        let object_hash = bucketd_core::sha256_hex(key);
        let _guard = self.lock_object(bucket, &object_hash).await;

        let object_dir = bucket_dir.join(&object_hash);
        tokio::fs::create_dir_all(&object_dir)
            .await
            .context("failed to create object directory")?;
        remove_stale_temp_files(&object_dir)
            .await
            .context("failed to clean object directory")?;

        let metadata = ObjectMetadata::for_body(key, &body);
        let metadata_json =
            serde_json::to_vec(&metadata).context("failed to serialize object metadata")?;

        write_atomic(&object_dir, METADATA_FILE, &metadata_json)
            .await
            .context("failed to write object metadata")?;
        write_atomic(&object_dir, BODY_FILE, &body)
            .await
            .context("failed to write object body")?;

        debug!(
            bucket,
            key,
            size = metadata.content_size,
            sha256 = %metadata.content_hash,
            "stored object"
        );
        Ok(())
    }

    /// Read the object stored under `(bucket, key)`.
    ///
    /// The body is re-hashed and compared with the checksum in its metadata.
    ///
    /// # Errors
    ///
    /// - [`StoreError::BucketNotFound`] / [`StoreError::ObjectNotFound`] if
    ///   either is missing.
    /// - [`StoreError::IntegrityError`] if the body does not match its checksum.
    /// - [`StoreError::Internal`] on I/O or metadata decoding failure.
    pub async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<StoredObject> {
        let bucket_dir = self.bucket_dir(bucket).await?;
        let object_hash = bucketd_core::sha256_hex(key);
        let _guard = self.lock_object(bucket, &object_hash).await;

        let object_dir = bucket_dir.join(&object_hash);
        if !is_dir(&object_dir).await {
            return Err(object_not_found(bucket, key));
        }

        let body = tokio::fs::read(object_dir.join(BODY_FILE))
            .await
            .context("failed to read object body")?;
        let metadata_json = tokio::fs::read(object_dir.join(METADATA_FILE))
            .await
            .context("failed to read object metadata")?;
        let metadata: ObjectMetadata =
            serde_json::from_slice(&metadata_json).context("failed to decode object metadata")?;

        let actual = bucketd_core::sha256_hex(&body);
        if actual != metadata.content_hash {
            warn!(
                bucket,
                key,
                expected = %metadata.content_hash,
                actual = %actual,
                "object body does not match its checksum"
            );
            return Err(StoreError::IntegrityError {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                expected: metadata.content_hash,
                actual,
            });
        }

        debug!(bucket, key, size = body.len(), "read object");
        Ok(StoredObject {
            body: Bytes::from(body),
            metadata,
        })
    }

    /// Remove the object stored under `(bucket, key)`.
    ///
    /// Deleting a missing object is an error.
    ///
    /// # Errors
    ///
    /// - [`StoreError::BucketNotFound`] / [`StoreError::ObjectNotFound`] if
    ///   either is missing.
    /// - [`StoreError::Internal`] on I/O failure.
    pub async fn delete_object(&self, bucket: &str, key: &str) -> StoreResult<()> {
        let bucket_dir = self.bucket_dir(bucket).await?;
        let object_hash = bucketd_core::sha256_hex(key);
        let _guard = self.lock_object(bucket, &object_hash).await;

        let object_dir = bucket_dir.join(&object_hash);
        match tokio::fs::remove_dir_all(&object_dir).await {
            Ok(()) => {
                debug!(bucket, key, "deleted object");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(object_not_found(bucket, key)),
            Err(e) => Err(anyhow::Error::new(e)
                .context("failed to remove object directory")
                .into()),
        }
    }

    /// Resolve an existing bucket directory.
    ///
    /// A name that fails the naming policy can never have been created, so
    /// it is reported as missing without touching the filesystem.
    async fn bucket_dir(&self, bucket: &str) -> StoreResult<PathBuf> {
        let not_found = || StoreError::BucketNotFound {
            bucket: bucket.to_owned(),
        };

        validate_bucket_name(bucket).map_err(|_| not_found())?;

        let dir = self.root.join(bucket);
        if is_dir(&dir).await {
            Ok(dir)
        } else {
            Err(not_found())
        }
    }

    async fn lock_object(&self, bucket: &str, object_hash: &str) -> KeyGuard {
        self.locks.lock(format!("{bucket}/{object_hash}")).await
    }
}

fn object_not_found(bucket: &str, key: &str) -> StoreError {
    StoreError::ObjectNotFound {
        bucket: bucket.to_owned(),
        key: key.to_owned(),
    }
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_dir())
}

/// Whether `name` is a temporary file left by [`write_atomic`].
fn is_temp_file_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}

/// Remove temporary files an interrupted write left in `dir`.
///
/// Callers hold the object lock, so no live write owns these files.
async fn remove_stale_temp_files(dir: &Path) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name().to_str().is_some_and(is_temp_file_name) {
            warn!(path = %entry.path().display(), "removing stale temporary file");
            tokio::fs::remove_file(entry.path()).await?;
        }
    }
    Ok(())
}

/// Write `data` to `dir/name` via a uniquely named sibling and a rename.
async fn write_atomic(dir: &Path, name: &str, data: &[u8]) -> std::io::Result<()> {
    let tmp = dir.join(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()));
    if let Err(e) = tokio::fs::write(&tmp, data).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    if let Err(e) = tokio::fs::rename(&tmp, dir.join(name)).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}
