// src/pipeline/listing.rs

//! Listing walker: paginate, archive, collect detail links.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{ListingLink, PageSource, SiteConfig};
use crate::services::{FieldExtractor, Renderer};
use crate::storage::LocalStorage;

/// Summary of a listing walk.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Links in page order, duplicates kept
    pub links: Vec<ListingLink>,
    pub pages: usize,
    pub page_failures: usize,
}

impl WalkOutcome {
    /// Links that already appeared earlier in the walk.
    pub fn duplicate_links(&self) -> usize {
        let unique: HashSet<&ListingLink> = self.links.iter().collect();
        self.links.len() - unique.len()
    }
}

/// Walks the numbered listing pages of the site.
pub struct ListingWalker<'a> {
    site: &'a SiteConfig,
    extractor: &'a FieldExtractor,
    storage: &'a LocalStorage,
}

impl<'a> ListingWalker<'a> {
    pub fn new(
        site: &'a SiteConfig,
        extractor: &'a FieldExtractor,
        storage: &'a LocalStorage,
    ) -> Self {
        Self {
            site,
            extractor,
            storage,
        }
    }

    /// Walk pages `start..=end`. A failing page contributes no links.
    pub async fn walk(&self, start: u32, end: u32, renderer: &dyn Renderer) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();

        for page in start..=end {
            outcome.pages += 1;
            match self.walk_page(page, renderer).await {
                Ok(links) => {
                    log::info!("Listing page {}: {} links", page, links.len());
                    outcome.links.extend(links);
                }
                Err(error) => {
                    outcome.page_failures += 1;
                    log::warn!(
                        "Failed to retrieve listing page {} ({}): {}",
                        page,
                        self.site.listing_url(page),
                        error
                    );
                }
            }
        }
        outcome
    }

    async fn walk_page(&self, page: u32, renderer: &dyn Renderer) -> Result<Vec<ListingLink>> {
        let url = self.site.listing_url(page);
        log::info!("Scraping listing {}", url);

        let document = renderer
            .render(&url)
            .await?
            .with_source(PageSource::ListingPage(page));
        self.storage.write_listing_page(page, &document).await?;

        Ok(self.extractor.extract_listing_links(&document))
    }
}
