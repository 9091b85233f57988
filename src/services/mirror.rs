// src/services/mirror.rs

//! Image mirroring: download, re-upload, clean up.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::services::Downloader;
use crate::storage::BlobStore;
use crate::utils::last_path_segment;

/// What happened to one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Empty image URL, nothing attempted
    Skipped,
    /// Uploaded to the given location
    Mirrored { location: String },
    /// Download or upload failed (already logged)
    Failed,
}

/// Copies product images to a remote store under their original basename.
pub struct ImageMirror {
    downloader: Arc<dyn Downloader>,
    store: Arc<dyn BlobStore>,
    remote_dir: String,
}

impl ImageMirror {
    pub fn new(
        downloader: Arc<dyn Downloader>,
        store: Arc<dyn BlobStore>,
        remote_dir: impl Into<String>,
    ) -> Self {
        Self {
            downloader,
            store,
            remote_dir: remote_dir.into().trim_matches('/').to_string(),
        }
    }

    /// Mirror one image. Failures are logged and reported, never propagated.
    pub async fn mirror(&self, image_url: &str) -> MirrorOutcome {
        if image_url.is_empty() {
            return MirrorOutcome::Skipped;
        }

        match self.try_mirror(image_url).await {
            Ok(location) => {
                log::info!("Image uploaded: {} -> {}", image_url, location);
                MirrorOutcome::Mirrored { location }
            }
            Err(e) => {
                log::warn!("Failed to mirror image {}: {}", image_url, e);
                MirrorOutcome::Failed
            }
        }
    }

    async fn try_mirror(&self, image_url: &str) -> Result<String> {
        let file_name = last_path_segment(image_url)
            .ok_or_else(|| AppError::validation(format!("no file name in {image_url}")))?;
        let remote_path = format!("{}/{}", self.remote_dir, file_name);

        // Removed when `scratch` drops, on every exit path below.
        let scratch = tempfile::Builder::new().prefix("image-mirror").tempdir()?;
        let local = scratch.path().join(&file_name);

        let bytes = self.downloader.download(image_url).await?;
        tokio::fs::write(&local, &bytes).await?;
        self.store.put_file(&local, &remote_path).await?;

        if let Err(e) = scratch.close() {
            log::warn!("Failed to remove temporary copy of {}: {}", image_url, e);
        }
        Ok(self.store.location(&remote_path))
    }
}
