// src/pipeline/publish.rs

//! Sink fan-out for extracted records.
//!
//! The ledger line is written by the detail pipeline; this stage handles the
//! spreadsheet row and the image mirror, each isolated from the other.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, MirrorTarget, ProductRecord};
use crate::services::{GoogleSheetsClient, HttpSession, ImageMirror, MirrorOutcome, SheetSink};
use crate::storage::{BlobStore, DirectoryStore};
use crate::utils::http;

/// Per-record sink results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// `None` when no spreadsheet is configured
    pub sheet_ok: Option<bool>,
    /// `None` when mirroring is disabled
    pub mirror: Option<MirrorOutcome>,
}

impl PublishReport {
    pub fn sheet_failed(&self) -> bool {
        self.sheet_ok == Some(false)
    }

    pub fn mirror_failed(&self) -> bool {
        self.mirror == Some(MirrorOutcome::Failed)
    }
}

/// Sends each record to the spreadsheet and its image to the mirror.
#[derive(Default)]
pub struct Publisher {
    sheet: Option<Arc<dyn SheetSink>>,
    mirror: Option<ImageMirror>,
}

impl Publisher {
    pub fn new(sheet: Option<Arc<dyn SheetSink>>, mirror: Option<ImageMirror>) -> Self {
        Self { sheet, mirror }
    }

    /// Assemble the sinks described by `config`.
    ///
    /// A sink that cannot be set up is disabled with a warning; the run goes on.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let sheet: Option<Arc<dyn SheetSink>> = if config.sheets.is_enabled() {
            let client = http::create_async_client(&config.crawler)?;
            match GoogleSheetsClient::from_env(client, &config.sheets) {
                Ok(sheet) => Some(Arc::new(sheet)),
                Err(e) => {
                    log::warn!("Spreadsheet sink disabled: {}", e);
                    None
                }
            }
        } else {
            log::info!("No spreadsheet configured; rows go to the ledger only");
            None
        };

        let mirror = if config.mirror.enabled {
            match blob_store(&config.mirror.target).await {
                Ok(store) => {
                    log::info!(
                        "Mirroring images to {}",
                        store.location(&config.mirror.remote_dir)
                    );
                    let downloader = Arc::new(HttpSession::open(&config.crawler)?);
                    Some(ImageMirror::new(
                        downloader,
                        store,
                        config.mirror.remote_dir.clone(),
                    ))
                }
                Err(e) => {
                    log::warn!("Image mirror disabled: {}", e);
                    None
                }
            }
        } else {
            log::info!("Image mirror disabled");
            None
        };

        Ok(Self::new(sheet, mirror))
    }

    /// Fan one record out. Never fails; each sink logs its own errors.
    pub async fn publish(&self, record: &ProductRecord) -> PublishReport {
        let sheet_ok = match &self.sheet {
            Some(sheet) => match sheet.append_row(&record.to_row()).await {
                Ok(()) => {
                    log::info!("Row appended to spreadsheet for {}", record.name);
                    Some(true)
                }
                Err(e) => {
                    log::warn!("Error storing {} in spreadsheet: {}", record.name, e);
                    Some(false)
                }
            },
            None => None,
        };

        let mirror = match &self.mirror {
            Some(mirror) => Some(mirror.mirror(&record.image_url).await),
            None => None,
        };

        PublishReport { sheet_ok, mirror }
    }
}

async fn blob_store(target: &MirrorTarget) -> Result<Arc<dyn BlobStore>> {
    match target {
        MirrorTarget::Directory { root } => Ok(Arc::new(DirectoryStore::new(root.clone()))),
        #[cfg(feature = "s3")]
        MirrorTarget::S3 { bucket } => Ok(Arc::new(
            crate::storage::S3Store::from_env(bucket.clone()).await,
        )),
        #[cfg(not(feature = "s3"))]
        MirrorTarget::S3 { bucket } => Err(crate::error::AppError::config(format!(
            "mirror target s3://{bucket} needs the `s3` feature"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::AppError;
    use crate::pipeline::testing::FakeSheet;
    use crate::services::Downloader;

    #[derive(Default)]
    struct CountingDownloader {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Downloader for CountingDownloader {
        async fn download(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push(url.to_string());
            Err(AppError::render(url, "unreachable"))
        }
    }

    struct NullStore;

    #[async_trait]
    impl BlobStore for NullStore {
        async fn put_file(&self, _local: &Path, _remote_path: &str) -> Result<()> {
            Ok(())
        }

        fn location(&self, remote_path: &str) -> String {
            remote_path.to_string()
        }
    }

    fn record(image_url: &str) -> ProductRecord {
        ProductRecord {
            name: "Grey Sofa".to_string(),
            price: "€399.00".to_string(),
            image_url: image_url.to_string(),
            delivery_estimate: "3-5 days".to_string(),
            stock_count: "7".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sheet_failure_does_not_block_mirror() {
        let sheet = Arc::new(FakeSheet::failing());
        let downloader = Arc::new(CountingDownloader::default());
        let mirror = ImageMirror::new(downloader.clone(), Arc::new(NullStore), "imgs");
        let publisher = Publisher::new(Some(sheet.clone() as Arc<dyn SheetSink>), Some(mirror));

        let report = publisher
            .publish(&record("https://www.3suisses.fr/img/sofa-42.jpg"))
            .await;

        assert!(report.sheet_failed());
        assert_eq!(sheet.rows().len(), 1);
        assert_eq!(downloader.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mirror_failure_does_not_affect_sheet() {
        let sheet = Arc::new(FakeSheet::default());
        let downloader = Arc::new(CountingDownloader::default());
        let mirror = ImageMirror::new(downloader, Arc::new(NullStore), "imgs");
        let publisher = Publisher::new(Some(sheet.clone() as Arc<dyn SheetSink>), Some(mirror));

        let report = publisher
            .publish(&record("https://www.3suisses.fr/img/sofa-42.jpg"))
            .await;

        assert_eq!(report.sheet_ok, Some(true));
        assert!(report.mirror_failed());
        assert_eq!(
            sheet.rows(),
            vec![record("https://www.3suisses.fr/img/sofa-42.jpg").to_row()]
        );
    }

    #[tokio::test]
    async fn test_empty_image_url_skips_mirror() {
        let downloader = Arc::new(CountingDownloader::default());
        let mirror = ImageMirror::new(downloader.clone(), Arc::new(NullStore), "imgs");
        let publisher = Publisher::new(None, Some(mirror));

        let report = publisher.publish(&record("")).await;

        assert_eq!(report.mirror, Some(MirrorOutcome::Skipped));
        assert_eq!(report.sheet_ok, None);
        assert!(downloader.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_config_without_sinks() {
        let config = Config::default();

        let publisher = Publisher::from_config(&config).await.unwrap();
        let report = publisher.publish(&record("https://x/img.jpg")).await;

        assert_eq!(report, PublishReport { sheet_ok: None, mirror: None });
    }

    #[tokio::test]
    async fn test_from_config_builds_directory_mirror_when_enabled() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.mirror.enabled = true;
        config.mirror.target = MirrorTarget::Directory {
            root: tmp.path().to_path_buf(),
        };

        let publisher = Publisher::from_config(&config).await.unwrap();
        let report = publisher.publish(&record("")).await;

        assert_eq!(report.mirror, Some(MirrorOutcome::Skipped));
    }
}
