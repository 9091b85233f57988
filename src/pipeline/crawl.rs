// src/pipeline/crawl.rs

//! Full crawl run: listing phase, detail phase, publication.

use std::future::Future;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, CrawlStats};
use crate::pipeline::{DetailPipeline, ListingWalker, Publisher};
use crate::services::{FieldExtractor, Renderer};
use crate::storage::LocalStorage;
use crate::utils;

/// Run the crawler against `storage`.
///
/// `open_session` is called once per phase; a failure to open a session is
/// the only error that aborts the run once it has started. Every other
/// failure is logged, counted and skipped.
pub async fn run_crawler<F, Fut, R>(
    config: &Config,
    storage: &LocalStorage,
    open_session: F,
    publisher: &Publisher,
) -> Result<CrawlStats>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<R>>,
    R: Renderer,
{
    let start_time = Utc::now();
    utils::log::header("Catalog crawler starting");

    storage.prepare().await?;
    let mut ledger = storage.fresh_ledger().await?;
    let extractor = FieldExtractor::new(&config.site.base_url, &config.selectors)?;

    utils::log::step(1, 3, "Listing - Collecting product links");
    let walk = {
        let session = open_session().await?;
        let walk = ListingWalker::new(&config.site, &extractor, storage)
            .walk(config.site.start_page, config.site.end_page, &session)
            .await;
        close_session(&session, "listing").await;
        walk
    };

    let duplicate_links = walk.duplicate_links();
    if duplicate_links > 0 {
        log::warn!(
            "{} links appear on more than one listing page and will be processed again",
            duplicate_links
        );
    }

    utils::log::step(2, 3, "Detail - Scraping product pages");
    let details = {
        let session = open_session().await?;
        let details = DetailPipeline::new(storage.page_cache(), &extractor)
            .run(&walk.links, &session, &mut ledger)
            .await;
        close_session(&session, "detail").await;
        details
    };
    log::info!(
        "Ledger {} holds {} records",
        ledger.path().display(),
        ledger.lines()
    );

    utils::log::step(3, 3, "Publish - Spreadsheet and images");
    let mut sheet_failures = 0;
    let mut mirror_failures = 0;
    for record in &details.records {
        let report = publisher.publish(record).await;
        if report.sheet_failed() {
            sheet_failures += 1;
        }
        if report.mirror_failed() {
            mirror_failures += 1;
        }
    }

    let stats = CrawlStats {
        start_time,
        end_time: Utc::now(),
        listing_pages: walk.pages,
        listing_failures: walk.page_failures,
        links: walk.links.len(),
        duplicate_links,
        cache_hits: details.cache_hits,
        records: details.records.len(),
        link_failures: details.link_failures,
        sheet_failures,
        mirror_failures,
    };
    utils::log::summary("Crawl complete", &stats.summary_items());

    Ok(stats)
}

async fn close_session<R: Renderer>(session: &R, phase: &str) {
    if let Err(e) = session.close().await {
        log::warn!("Failed to close {} session: {}", phase, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;
    use std::sync::Arc;

    use crate::error::AppError;
    use crate::pipeline::testing::{FakeRenderer, detail_html, listing_html};
    use tempfile::TempDir;

    fn config() -> Config {
        let mut config = Config::default();
        config.site.listing_url_template = "https://www.3suisses.fr/list?page={page}".to_string();
        config.site.start_page = 1;
        config.site.end_page = 2;
        config
    }

    fn renderer() -> Arc<FakeRenderer> {
        Arc::new(
            FakeRenderer::new()
                .with_page(
                    "https://www.3suisses.fr/list?page=1",
                    listing_html(&["/p/a", "/p/b"]),
                )
                .with_page(
                    "https://www.3suisses.fr/list?page=2",
                    listing_html(&["/p/c"]),
                )
                .with_page(
                    "https://www.3suisses.fr/p/a",
                    detail_html("A | 3 SUISSES", "€1", "/img/a.jpg", "1 day", Some("1")),
                )
                .with_page(
                    "https://www.3suisses.fr/p/c",
                    detail_html("C | 3 SUISSES", "€3", "/img/c.jpg", "3 days", Some("3")),
                ),
        )
    }

    #[tokio::test]
    async fn test_run_counts_and_closes_sessions() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let renderer = renderer();

        let stats = run_crawler(
            &config(),
            &storage,
            || future::ready(Ok(renderer.clone())),
            &Publisher::default(),
        )
        .await
        .unwrap();

        assert_eq!(stats.listing_pages, 2);
        assert_eq!(stats.listing_failures, 0);
        assert_eq!(stats.links, 3);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.link_failures, 1);
        assert_eq!(renderer.closes(), 2);

        let ledger = std::fs::read_to_string(storage.ledger_path()).unwrap();
        assert_eq!(
            ledger,
            "A\t€1\thttps://www.3suisses.fr/img/a.jpg\t1 day\t1\n\
             C\t€3\thttps://www.3suisses.fr/img/c.jpg\t3 days\t3\n"
        );
    }

    #[tokio::test]
    async fn test_session_open_failure_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let result = run_crawler(
            &config(),
            &storage,
            || future::ready(Err::<FakeRenderer, _>(AppError::config("no browser available"))),
            &Publisher::default(),
        )
        .await;

        assert!(result.is_err());
    }
}
