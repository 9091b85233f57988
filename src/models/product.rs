// src/models/product.rs

//! Product records and listing links.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for a missing price or stock count.
pub const NUMERIC_SENTINEL: &str = "0";

/// Placeholder for a missing name, image or delivery estimate.
pub const TEXT_SENTINEL: &str = "";

/// An absolute URL to a product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingLink(String);

impl ListingLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product extracted from one detail page.
///
/// Every field is always present; fields the page did not yield carry
/// [`TEXT_SENTINEL`] or [`NUMERIC_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name without site branding
    pub name: String,

    /// Price as displayed, currency included
    pub price: String,

    /// Absolute URL of the primary image
    pub image_url: String,

    /// Delivery estimate as displayed
    pub delivery_estimate: String,

    /// Units in stock, digits only
    pub stock_count: String,
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self {
            name: TEXT_SENTINEL.to_string(),
            price: NUMERIC_SENTINEL.to_string(),
            image_url: TEXT_SENTINEL.to_string(),
            delivery_estimate: TEXT_SENTINEL.to_string(),
            stock_count: NUMERIC_SENTINEL.to_string(),
        }
    }
}

impl ProductRecord {
    /// The five fields in ledger/spreadsheet order.
    pub fn fields(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.price.as_str(),
            self.image_url.as_str(),
            self.delivery_estimate.as_str(),
            self.stock_count.as_str(),
        ]
    }

    /// Owned row for the spreadsheet sink.
    pub fn to_row(&self) -> Vec<String> {
        self.fields().iter().map(|f| f.to_string()).collect()
    }

    /// One ledger line, newline included.
    ///
    /// Tabs and line breaks inside a field are flattened to spaces so the
    /// line always holds exactly five columns.
    pub fn to_tab_line(&self) -> String {
        let cells: Vec<String> = self
            .fields()
            .iter()
            .map(|f| f.replace(['\t', '\r', '\n'], " "))
            .collect();
        format!("{}\n", cells.join("\t"))
    }
}
