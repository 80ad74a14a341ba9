use std::time::Duration;

use async_trait::async_trait;

use super::error::StorageError;
use super::key::ObjectKey;

/// External object storage holding catalog image bytes.
///
/// Clients upload directly through a presigned URL; the server only ever
/// presigns, checks and deletes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `key`, replacing any existing object.
    async fn put(&self, key: &ObjectKey, data: &[u8], content_type: &str)
    -> Result<(), StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    /// A missing object is never an error.
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Issue a URL the client can `PUT` the object body to, valid for `expires_in`.
    async fn presign_put(
        &self,
        key: &ObjectKey,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;
}
