// src/storage/cache.rs

//! On-disk page cache keyed by link slug.
//!
//! A present entry is authoritative: there is no TTL, no eviction and no
//! comparison against a live fetch.

use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::PageDocument;
use crate::storage::local::{read_bytes, write_bytes};
use crate::utils::last_path_segment;

/// Derive the cache slot for a detail URL: its last path segment.
///
/// Repeated runs against the same link always land on the same slot.
pub fn cache_key(url: &str) -> Result<String> {
    let segment =
        last_path_segment(url).ok_or_else(|| AppError::cache(url, "URL has no path segment"))?;
    if segment == "." || segment == ".." {
        return Err(AppError::cache(url, "URL path segment is not a file name"));
    }
    Ok(segment)
}

/// Filesystem-backed page cache.
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing slot `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.html"))
    }

    /// Cached document for `key`, labelled with `url`.
    pub async fn lookup(&self, key: &str, url: &str) -> Result<Option<PageDocument>> {
        let Some(bytes) = read_bytes(&self.entry_path(key)).await? else {
            return Ok(None);
        };
        let html = String::from_utf8(bytes).map_err(|e| AppError::cache(key, e))?;
        Ok(Some(PageDocument::from_url(url, html)))
    }

    /// Store `document` in slot `key`. Visible to `lookup` once this returns.
    pub async fn store(&self, key: &str, document: &PageDocument) -> Result<()> {
        write_bytes(&self.entry_path(key), document.html().as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_key_uses_basename() {
        assert_eq!(
            cache_key("https://www.3suisses.fr/p/sofa-42").unwrap(),
            "sofa-42"
        );
        assert_eq!(
            cache_key("https://www.3suisses.fr/p/sofa-42?color=grey").unwrap(),
            "sofa-42"
        );
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        let url = "https://www.3suisses.fr/P-123-canape-droit.htm";
        assert_eq!(cache_key(url).unwrap(), cache_key(url).unwrap());
    }

    #[test]
    fn test_cache_key_rejects_bare_origin() {
        assert!(cache_key("https://www.3suisses.fr/").is_err());
        assert!(cache_key("/p/sofa-42").is_err());
    }

    #[tokio::test]
    async fn test_lookup_miss() {
        let tmp = TempDir::new().unwrap();
        let cache = PageCache::new(tmp.path());

        let hit = cache.lookup("sofa-42", "https://x/p/sofa-42").await.unwrap();
        assert!(hit.is_none());
    }

    #[tokio::test]
    async fn test_store_then_lookup_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let cache = PageCache::new(tmp.path());
        let html = "<html><title>Grey Sofa | 3 SUISSES</title>\n\t€</html>";
        let doc = PageDocument::from_url("https://x/p/sofa-42", html);

        cache.store("sofa-42", &doc).await.unwrap();
        let hit = cache
            .lookup("sofa-42", "https://x/p/sofa-42")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(hit.html(), html);
        assert!(tmp.path().join("sofa-42.html").exists());
    }
}
