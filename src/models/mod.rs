// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod document;
mod product;
mod selectors;
mod stats;

// Re-export all public types
pub use config::{
    Config, CrawlerConfig, MirrorConfig, MirrorTarget, RendererKind, SheetsConfig, SiteConfig,
};
pub use document::{PageDocument, PageSource};
pub use product::{ListingLink, NUMERIC_SENTINEL, ProductRecord, TEXT_SENTINEL};
pub use selectors::ProductSelectors;
pub use stats::CrawlStats;
