// src/models/document.rs

//! Raw page documents.

use std::fmt;

/// Where a document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// A detail page URL
    Url(String),
    /// A numbered listing page
    ListingPage(u32),
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSource::Url(url) => f.write_str(url),
            PageSource::ListingPage(page) => write!(f, "listing page {page}"),
        }
    }
}

/// Immutable raw markup captured for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    source: PageSource,
    html: String,
}

impl PageDocument {
    pub fn new(source: PageSource, html: impl Into<String>) -> Self {
        Self {
            source,
            html: html.into(),
        }
    }

    /// Document rendered from a URL.
    pub fn from_url(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self::new(PageSource::Url(url.into()), html)
    }

    pub fn source(&self) -> &PageSource {
        &self.source
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Re-label the document, e.g. a listing URL render as its page number.
    pub fn with_source(self, source: PageSource) -> Self {
        Self { source, ..self }
    }
}
