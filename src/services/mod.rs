// src/services/mod.rs

//! Service layer for the crawler application.
//!
//! This module contains the capabilities the pipeline is assembled from:
//! - Page rendering and downloads (`Renderer`, `Downloader`, `HttpSession`,
//!   and `BrowserSession` with the `browser` feature)
//! - Field extraction (`FieldExtractor`)
//! - Spreadsheet appends (`SheetSink`, `GoogleSheetsClient`)
//! - Image mirroring (`ImageMirror`)

#[cfg(feature = "browser")]
mod browser;
mod extractor;
mod mirror;
mod renderer;
mod sheets;

#[cfg(feature = "browser")]
pub use browser::BrowserSession;
pub use extractor::FieldExtractor;
pub use mirror::{ImageMirror, MirrorOutcome};
pub use renderer::{Downloader, HttpSession, Renderer};
pub use sheets::{GoogleSheetsClient, SheetSink};
