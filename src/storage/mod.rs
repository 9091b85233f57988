// src/storage/mod.rs

//! Storage for pages, records and mirrored images.
//!
//! ## Directory Structure
//!
//! ```text
//! {output_dir}/
//! ├── LISTING/
//! │   └── page-<n>.html     # Raw listing pages (audit trail)
//! ├── ALL/
//! │   └── <slug>.html       # Page cache, one per detail link
//! └── extract.tab           # Output ledger, recreated every run
//! ```
//!
//! Mirrored images go to a [`BlobStore`]: a directory on a mounted share or,
//! with the `s3` feature, an S3 bucket.

pub mod cache;
pub mod directory;
pub mod ledger;
pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use cache::{PageCache, cache_key};
pub use directory::DirectoryStore;
pub use ledger::Ledger;
pub use local::LocalStorage;
#[cfg(feature = "s3")]
pub use s3::S3Store;

/// Trait for remote blob stores.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the file at `local` under `remote_path`, replacing any existing blob.
    async fn put_file(&self, local: &Path, remote_path: &str) -> Result<()>;

    /// Human-readable location of `remote_path`, for logging.
    fn location(&self, remote_path: &str) -> String;
}
