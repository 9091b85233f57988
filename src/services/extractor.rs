// src/services/extractor.rs

//! Field extraction from listing and detail pages.
//!
//! Every field has its own selector and falls back to its sentinel on a miss,
//! so a page that resolves nothing still yields a complete record.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    ListingLink, NUMERIC_SENTINEL, PageDocument, ProductRecord, ProductSelectors, TEXT_SENTINEL,
};
use crate::utils::resolve_url;

/// Compiled selectors plus the origin used to absolutize links.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    base_url: Url,
    listing_item: Selector,
    listing_link: Selector,
    name: Selector,
    name_suffix: String,
    price: Selector,
    image_container: Selector,
    image_slide: Selector,
    image_link: Selector,
    delivery: Selector,
    stock: Selector,
    attr_name: String,
    digits: Regex,
}

impl FieldExtractor {
    /// Compile the configured selectors. Invalid selectors are a config error.
    pub fn new(base_url: &str, selectors: &ProductSelectors) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            listing_item: Self::parse_selector(&selectors.listing_item)?,
            listing_link: Self::parse_selector(&selectors.listing_link)?,
            name: Self::parse_selector(&selectors.name)?,
            name_suffix: selectors.name_suffix.clone(),
            price: Self::parse_selector(&selectors.price)?,
            image_container: Self::parse_selector(&selectors.image_container)?,
            image_slide: Self::parse_selector(&selectors.image_slide)?,
            image_link: Self::parse_selector(&selectors.image_link)?,
            delivery: Self::parse_selector(&selectors.delivery)?,
            stock: Self::parse_selector(&selectors.stock)?,
            attr_name: selectors.attr_name.clone(),
            digits: Regex::new(r"\d+").map_err(|e| AppError::config(e.to_string()))?,
        })
    }

    /// Detail links of every product tile on a listing page, in page order.
    ///
    /// Tiles without a usable link are skipped.
    pub fn extract_listing_links(&self, document: &PageDocument) -> Vec<ListingLink> {
        let html = Html::parse_document(document.html());
        let mut links = Vec::new();

        for item in html.select(&self.listing_item) {
            let href = item
                .select(&self.listing_link)
                .next()
                .and_then(|a| a.value().attr(&self.attr_name))
                .map(str::trim)
                .filter(|href| !href.is_empty());

            match href {
                Some(href) => links.push(ListingLink::new(resolve_url(&self.base_url, href))),
                None => log::debug!("Skipping product tile without link on {}", document.source()),
            }
        }
        links
    }

    /// Extract the five product fields from a detail page.
    pub fn extract_product_record(&self, document: &PageDocument) -> ProductRecord {
        let html = Html::parse_document(document.html());

        let name = self
            .first_text(&html, &self.name)
            .map(|title| self.strip_name_suffix(&title))
            .unwrap_or_else(|| TEXT_SENTINEL.to_string());

        let price = self
            .first_text(&html, &self.price)
            .unwrap_or_else(|| NUMERIC_SENTINEL.to_string());

        let image_url = self
            .first_image_href(&html)
            .map(|href| resolve_url(&self.base_url, href))
            .unwrap_or_else(|| TEXT_SENTINEL.to_string());

        let delivery_estimate = self
            .first_text(&html, &self.delivery)
            .unwrap_or_else(|| TEXT_SENTINEL.to_string());

        // selector miss and digit miss both collapse to the sentinel
        let stock_count = self
            .first_text(&html, &self.stock)
            .and_then(|text| self.digits.find(&text).map(|m| m.as_str().to_string()))
            .unwrap_or_else(|| NUMERIC_SENTINEL.to_string());

        ProductRecord {
            name,
            price,
            image_url,
            delivery_estimate,
            stock_count,
        }
    }

    /// Anchor of the first slide of the first carousel slot. Later slides
    /// are never consulted, even when the first one has no anchor.
    fn first_image_href<'a>(&self, html: &'a Html) -> Option<&'a str> {
        let container = html.select(&self.image_container).next()?;
        let slide = container.select(&self.image_slide).next()?;
        slide
            .select(&self.image_link)
            .next()?
            .value()
            .attr(&self.attr_name)
            .map(str::trim)
            .filter(|href| !href.is_empty())
    }

    fn first_text(&self, html: &Html, selector: &Selector) -> Option<String> {
        html.select(selector).next().map(|el| element_text(&el))
    }

    fn strip_name_suffix(&self, title: &str) -> String {
        if self.name_suffix.is_empty() {
            return title.to_string();
        }
        title.replace(&self.name_suffix, "").trim().to_string()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
