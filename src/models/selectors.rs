// src/models/selectors.rs

//! CSS selectors for scraping listing and detail pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSelectors {
    /// Selector for each product tile on a listing page
    #[serde(default = "defaults::listing_item")]
    pub listing_item: String,

    /// Selector for the link element within a product tile
    #[serde(default = "defaults::listing_link")]
    pub listing_link: String,

    /// Selector for the product name on the detail page
    #[serde(default = "defaults::name")]
    pub name: String,

    /// Site branding removed from the product name
    #[serde(default = "defaults::name_suffix")]
    pub name_suffix: String,

    /// Selector for the price element
    #[serde(default = "defaults::price")]
    pub price: String,

    /// Selector for the image carousel slot; only the first match is used
    #[serde(default = "defaults::image_container")]
    pub image_container: String,

    /// Selector for a slide inside the carousel slot; only the first match is used
    #[serde(default = "defaults::image_slide")]
    pub image_slide: String,

    /// Selector for the image anchor inside the first slide
    #[serde(default = "defaults::image_link")]
    pub image_link: String,

    /// Selector for the delivery estimate element
    #[serde(default = "defaults::delivery")]
    pub delivery: String,

    /// Selector for the stock count element
    #[serde(default = "defaults::stock")]
    pub stock: String,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,
}

impl Default for ProductSelectors {
    fn default() -> Self {
        Self {
            listing_item: defaults::listing_item(),
            listing_link: defaults::listing_link(),
            name: defaults::name(),
            name_suffix: defaults::name_suffix(),
            price: defaults::price(),
            image_container: defaults::image_container(),
            image_slide: defaults::image_slide(),
            image_link: defaults::image_link(),
            delivery: defaults::delivery(),
            stock: defaults::stock(),
            attr_name: defaults::attr_name(),
        }
    }
}

mod defaults {
    pub fn listing_item() -> String {
        "div.col-3.item__wrapper".into()
    }
    pub fn listing_link() -> String {
        "a".into()
    }
    pub fn name() -> String {
        "title".into()
    }
    pub fn name_suffix() -> String {
        "| 3 SUISSES".into()
    }
    pub fn price() -> String {
        "span.dyn_prod_price".into()
    }
    pub fn image_container() -> String {
        "div.owl-item".into()
    }
    pub fn image_slide() -> String {
        "li".into()
    }
    pub fn image_link() -> String {
        "a".into()
    }
    pub fn delivery() -> String {
        "span.dyn_time_fret".into()
    }
    pub fn stock() -> String {
        "span.small-stock.product__stock--nb".into()
    }
    pub fn attr_name() -> String {
        "href".into()
    }
}
