//! Object storage access for uploaded resumes.
//!
//! S3 / MinIO sits behind the `ObjectStore` trait so the analysis pipeline
//! can be tested against an in-memory fake. Only the read side is modeled —
//! uploads happen at submission time, outside this service.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object {key} does not exist in storage")]
    NotFound { key: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Read-side storage capability consumed by the resume text extractor.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;
    async fn read(&self, key: &str) -> Result<Bytes, StorageError>;
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                if err.as_service_error().map(|e| e.is_not_found()) == Some(true) {
                    Ok(false)
                } else {
                    Err(StorageError::Backend(err.to_string()))
                }
            }
        }
    }

    async fn read(&self, key: &str) -> Result<Bytes, StorageError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().map(|e| e.is_no_such_key()) == Some(true) {
                    StorageError::NotFound {
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Backend(err.to_string())
                }
            })?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(data.into_bytes())
    }
}
