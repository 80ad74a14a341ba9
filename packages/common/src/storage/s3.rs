use std::time::Duration;

use async_trait::async_trait;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::BlobStore;
use crate::config::StorageConfig;

/// S3-compatible blob store (AWS S3, MinIO, R2, ...).
pub struct S3BlobStore {
    bucket: Box<Bucket>,
}

impl S3BlobStore {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| StorageError::Backend(format!("invalid region: {e}")))?,
        };

        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(access), Some(secret)) => {
                Credentials::new(Some(access), Some(secret), None, None, None)
            }
            _ => Credentials::default(),
        }
        .map_err(|e| StorageError::Backend(format!("credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials).map_err(backend)?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self { bucket })
    }
}

fn backend(e: S3Error) -> StorageError {
    StorageError::Backend(e.to_string())
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        key: &ObjectKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let response = self
            .bucket
            .put_object_with_content_type(key.as_str(), data, content_type)
            .await
            .map_err(backend)?;
        if !is_success(response.status_code()) {
            return Err(StorageError::Backend(format!(
                "put {key} returned {}",
                response.status_code()
            )));
        }
        Ok(())
    }

    async fn exists(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        match self.bucket.head_object(key.as_str()).await {
            Ok((_, status)) if is_success(status) => Ok(true),
            Ok((_, 404)) => Ok(false),
            Ok((_, status)) => Err(StorageError::Backend(format!(
                "head {key} returned {status}"
            ))),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(e) => Err(backend(e)),
        }
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        // S3 answers 204 whether or not the object existed.
        if !self.exists(key).await? {
            return Ok(false);
        }
        match self.bucket.delete_object(key.as_str()).await {
            Ok(response) if is_success(response.status_code()) => Ok(true),
            Ok(response) if response.status_code() == 404 => Ok(false),
            Ok(response) => Err(StorageError::Backend(format!(
                "delete {key} returned {}",
                response.status_code()
            ))),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(e) => Err(backend(e)),
        }
    }

    async fn presign_put(
        &self,
        key: &ObjectKey,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let secs = u32::try_from(expires_in.as_secs()).unwrap_or(u32::MAX);
        let value = HeaderValue::from_str(content_type)
            .map_err(|_| StorageError::Backend(format!("invalid content type: {content_type}")))?;
        // Signed, so the upload must declare the same type.
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, value);
        self.bucket
            .presign_put(key.as_str(), secs, Some(headers), None)
            .await
            .map_err(backend)
    }
}
