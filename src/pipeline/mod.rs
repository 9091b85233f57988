// src/pipeline/mod.rs

//! Pipeline stages for a crawl run.
//!
//! - `ListingWalker`: paginate the listing and collect detail links
//! - `DetailPipeline`: cache-or-render each link, extract, append to the ledger
//! - `Publisher`: spreadsheet row and image mirror per record
//! - `run_crawler`: the whole run, one renderer session per phase

pub mod crawl;
pub mod detail;
pub mod listing;
pub mod publish;

#[cfg(test)]
pub(crate) mod testing;

pub use crawl::run_crawler;
pub use detail::{DetailOutcome, DetailPipeline};
pub use listing::{ListingWalker, WalkOutcome};
pub use publish::{PublishReport, Publisher};
