// src/storage/s3.rs

//! AWS S3 blob store for mirrored images.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{AppError, Result};
use crate::storage::BlobStore;

/// S3-based blob store.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Create a new S3 store instance.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Create an S3 store using credentials from the environment.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), bucket)
    }
}

#[async_trait]
impl BlobStore for S3Store {
    async fn put_file(&self, local: &Path, remote_path: &str) -> Result<()> {
        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| AppError::S3(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(remote_path)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::upload(self.location(remote_path), e.into_service_error()))?;

        log::debug!("Wrote {}", self.location(remote_path));
        Ok(())
    }

    fn location(&self, remote_path: &str) -> String {
        format!("s3://{}/{}", self.bucket, remote_path)
    }
}
