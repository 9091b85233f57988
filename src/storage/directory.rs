// src/storage/directory.rs

//! Blob store backed by a directory, typically a mounted remote share.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::storage::BlobStore;

/// Stores blobs as files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, remote_path: &str) -> PathBuf {
        remote_path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

#[async_trait]
impl BlobStore for DirectoryStore {
    async fn put_file(&self, local: &Path, remote_path: &str) -> Result<()> {
        if remote_path.split('/').any(|part| part == "..") {
            return Err(AppError::upload(remote_path, "path escapes the store root"));
        }
        let target = self.path(remote_path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::upload(remote_path, e))?;
        }
        tokio::fs::copy(local, &target)
            .await
            .map_err(|e| AppError::upload(remote_path, e))?;
        Ok(())
    }

    fn location(&self, remote_path: &str) -> String {
        self.path(remote_path).display().to_string()
    }
}
