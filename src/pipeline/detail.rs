// src/pipeline/detail.rs

//! Detail pipeline: cache lookup, render on miss, extract, append to ledger.

use crate::error::Result;
use crate::models::{ListingLink, PageDocument, ProductRecord};
use crate::services::{FieldExtractor, Renderer};
use crate::storage::{Ledger, PageCache, cache_key};

/// Summary of the detail phase.
#[derive(Debug, Default)]
pub struct DetailOutcome {
    /// Extracted records in link order
    pub records: Vec<ProductRecord>,
    pub link_total: usize,
    pub link_failures: usize,
    pub cache_hits: usize,
}

/// Processes detail links one at a time.
pub struct DetailPipeline<'a> {
    cache: PageCache,
    extractor: &'a FieldExtractor,
}

impl<'a> DetailPipeline<'a> {
    pub fn new(cache: PageCache, extractor: &'a FieldExtractor) -> Self {
        Self { cache, extractor }
    }

    /// Process every link; a failing link is logged and skipped.
    pub async fn run(
        &self,
        links: &[ListingLink],
        renderer: &dyn Renderer,
        ledger: &mut Ledger,
    ) -> DetailOutcome {
        let mut outcome = DetailOutcome {
            link_total: links.len(),
            ..DetailOutcome::default()
        };

        for link in links {
            match self.try_process(link, renderer, ledger).await {
                Ok((record, from_cache)) => {
                    if from_cache {
                        outcome.cache_hits += 1;
                    }
                    outcome.records.push(record);
                }
                Err(error) => {
                    outcome.link_failures += 1;
                    log::warn!("Error scraping data from {}: {}", link, error);
                }
            }
        }
        outcome
    }

    /// Process one link, returning `None` on any failure.
    pub async fn process(
        &self,
        link: &ListingLink,
        renderer: &dyn Renderer,
        ledger: &mut Ledger,
    ) -> Option<ProductRecord> {
        match self.try_process(link, renderer, ledger).await {
            Ok((record, _)) => Some(record),
            Err(error) => {
                log::warn!("Error scraping data from {}: {}", link, error);
                None
            }
        }
    }

    /// Returns the record and whether the page came from the cache.
    async fn try_process(
        &self,
        link: &ListingLink,
        renderer: &dyn Renderer,
        ledger: &mut Ledger,
    ) -> Result<(ProductRecord, bool)> {
        let (document, from_cache) = self.fetch(link, renderer).await?;
        log::info!("Data scraped for {}", link);

        let record = self.extractor.extract_product_record(&document);
        ledger.append(&record).await?;
        Ok((record, from_cache))
    }

    /// Cached document if present, otherwise render and cache it first.
    async fn fetch(
        &self,
        link: &ListingLink,
        renderer: &dyn Renderer,
    ) -> Result<(PageDocument, bool)> {
        let key = cache_key(link.as_str())?;

        if let Some(document) = self.cache.lookup(&key, link.as_str()).await? {
            log::debug!("Cache hit for {} ({})", link, key);
            return Ok((document, true));
        }

        let document = renderer.render(link.as_str()).await?;
        self.cache.store(&key, &document).await?;
        Ok((document, false))
    }
}
