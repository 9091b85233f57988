// src/models/stats.rs

//! Run statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters collected over one crawl run.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub listing_pages: usize,
    pub listing_failures: usize,
    pub links: usize,
    pub duplicate_links: usize,
    pub cache_hits: usize,
    pub records: usize,
    pub link_failures: usize,
    pub sheet_failures: usize,
    pub mirror_failures: usize,
}

impl CrawlStats {
    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }

    /// Key/value pairs for the run summary.
    pub fn summary_items(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Listing pages",
                format!("{} ({} failed)", self.listing_pages, self.listing_failures),
            ),
            (
                "Links",
                format!("{} ({} duplicates)", self.links, self.duplicate_links),
            ),
            ("Cache hits", self.cache_hits.to_string()),
            (
                "Records",
                format!("{} ({} links skipped)", self.records, self.link_failures),
            ),
            ("Spreadsheet failures", self.sheet_failures.to_string()),
            ("Mirror failures", self.mirror_failures.to_string()),
            ("Elapsed", format!("{}s", self.elapsed_secs())),
        ]
    }
}
