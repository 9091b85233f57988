// src/storage/local.rs

//! Local filesystem storage implementation.
//!
//! Owns the output directory layout and the atomic write/read helpers the
//! page cache and listing artifacts share.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::PageDocument;
use crate::storage::{Ledger, PageCache};

const LISTING_DIR: &str = "LISTING";
const CACHE_DIR: &str = "ALL";
const LEDGER_FILE: &str = "extract.tab";

/// Local filesystem storage rooted at the output directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn listing_dir(&self) -> PathBuf {
        self.root_dir.join(LISTING_DIR)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root_dir.join(CACHE_DIR)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.root_dir.join(LEDGER_FILE)
    }

    /// Path of the archived listing page `page`.
    pub fn listing_path(&self, page: u32) -> PathBuf {
        self.listing_dir().join(format!("page-{page}.html"))
    }

    /// Create the listing and cache directories if missing.
    pub async fn prepare(&self) -> Result<()> {
        tokio::fs::create_dir_all(self.listing_dir()).await?;
        tokio::fs::create_dir_all(self.cache_dir()).await?;
        Ok(())
    }

    /// Page cache over `ALL/`.
    pub fn page_cache(&self) -> PageCache {
        PageCache::new(self.cache_dir())
    }

    /// Start a fresh ledger, discarding the previous run's.
    pub async fn fresh_ledger(&self) -> Result<Ledger> {
        Ledger::create(self.ledger_path()).await
    }

    /// Persist a rendered listing page as `LISTING/page-<n>.html`.
    pub async fn write_listing_page(&self, page: u32, document: &PageDocument) -> Result<PathBuf> {
        let path = self.listing_path(page);
        write_bytes(&path, document.html().as_bytes()).await?;
        Ok(path)
    }
}

/// Ensure parent directory exists.
async fn ensure_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

/// Write bytes atomically (write to temp, then rename).
pub(crate) async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_dir(path).await?;

    let tmp = path.with_extension("tmp");
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Read bytes, returning None if file doesn't exist.
pub(crate) async fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageSource;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/test.txt");

        write_bytes(&path, b"hello").await.unwrap();
        let data = read_bytes(&path).await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let data = read_bytes(&tmp.path().join("nope.txt")).await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_prepare_creates_layout() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("out"));

        storage.prepare().await.unwrap();
        assert!(storage.listing_dir().is_dir());
        assert!(storage.cache_dir().is_dir());

        // idempotent
        storage.prepare().await.unwrap();
    }

    #[tokio::test]
    async fn test_listing_page_artifact() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let doc = PageDocument::new(PageSource::ListingPage(3), "<html>3</html>");

        let path = storage.write_listing_page(3, &doc).await.unwrap();

        assert_eq!(path, tmp.path().join("LISTING").join("page-3.html"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html>3</html>");
    }
}
