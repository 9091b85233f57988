// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ProductSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and rendering behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Target site and listing span
    #[serde(default)]
    pub site: SiteConfig,

    /// Extraction selectors
    #[serde(default)]
    pub selectors: ProductSelectors,

    /// Remote spreadsheet settings
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// Image mirroring settings
    #[serde(default)]
    pub mirror: MirrorConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.renderer == RendererKind::Browser && !cfg!(feature = "browser") {
            return Err(AppError::validation(
                "crawler.renderer = \"browser\" needs the `browser` feature",
            ));
        }
        url::Url::parse(&self.site.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url is invalid: {e}")))?;
        if !self.site.listing_url_template.contains("{page}") {
            return Err(AppError::validation(
                "site.listing_url_template must contain {page}",
            ));
        }
        if self.site.start_page == 0 {
            return Err(AppError::validation("site.start_page is 1-indexed"));
        }
        if self.site.start_page > self.site.end_page {
            return Err(AppError::validation(
                "site.start_page must not exceed site.end_page",
            ));
        }
        if self.mirror.enabled && self.mirror.remote_dir.trim_matches('/').is_empty() {
            return Err(AppError::validation("mirror.remote_dir is empty"));
        }
        Ok(())
    }
}

/// HTTP client and rendering behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Upper bound on a single render or download, in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Which renderer each phase opens
    #[serde(default)]
    pub renderer: RendererKind,

    /// Pause after navigation so scripts can fill the page (browser only)
    #[serde(default = "defaults::render_wait_ms")]
    pub render_wait_ms: u64,

    /// DevTools endpoint of a running browser; launches a local one when unset
    #[serde(default)]
    pub browser_url: Option<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            renderer: RendererKind::default(),
            render_wait_ms: defaults::render_wait_ms(),
            browser_url: None,
        }
    }
}

/// Page renderer backing a crawl session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Plain HTTP GET; fine for server-rendered pages
    #[default]
    Http,
    /// Headless Chromium (requires the `browser` feature)
    Browser,
}

/// Target site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Origin used to absolutize relative links
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Listing endpoint; `{page}` is replaced by the page number
    #[serde(default = "defaults::listing_url_template")]
    pub listing_url_template: String,

    /// First listing page (inclusive, 1-indexed)
    #[serde(default = "defaults::start_page")]
    pub start_page: u32,

    /// Last listing page (inclusive)
    #[serde(default = "defaults::end_page")]
    pub end_page: u32,
}

impl SiteConfig {
    /// Listing URL for a page number.
    pub fn listing_url(&self, page: u32) -> String {
        self.listing_url_template.replace("{page}", &page.to_string())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            listing_url_template: defaults::listing_url_template(),
            start_page: defaults::start_page(),
            end_page: defaults::end_page(),
        }
    }
}

/// Remote spreadsheet settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Target spreadsheet; empty disables the spreadsheet sink
    #[serde(default)]
    pub spreadsheet_id: String,

    /// A1 range rows are appended after
    #[serde(default = "defaults::sheet_range")]
    pub range: String,

    /// Environment variable holding the OAuth bearer token
    #[serde(default = "defaults::token_env")]
    pub token_env: String,

    /// Sheets REST endpoint
    #[serde(default = "defaults::sheets_api_base")]
    pub api_base: String,
}

impl SheetsConfig {
    pub fn is_enabled(&self) -> bool {
        !self.spreadsheet_id.trim().is_empty()
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            range: defaults::sheet_range(),
            token_env: defaults::token_env(),
            api_base: defaults::sheets_api_base(),
        }
    }
}

/// Image mirroring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Off unless a target is chosen explicitly
    #[serde(default = "defaults::mirror_enabled")]
    pub enabled: bool,

    /// Remote directory images are stored under
    #[serde(default = "defaults::remote_dir")]
    pub remote_dir: String,

    /// Backing store for uploaded images
    #[serde(default)]
    pub target: MirrorTarget,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::mirror_enabled(),
            remote_dir: defaults::remote_dir(),
            target: MirrorTarget::default(),
        }
    }
}

/// Where mirrored images end up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MirrorTarget {
    /// A directory on a mounted remote share
    Directory { root: PathBuf },
    /// An S3 bucket (requires the `s3` feature)
    S3 { bucket: String },
}

impl Default for MirrorTarget {
    fn default() -> Self {
        Self::Directory {
            root: PathBuf::from("remote"),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; catalog-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn render_wait_ms() -> u64 {
        1000
    }

    // Site defaults
    pub fn base_url() -> String {
        "https://www.3suisses.fr".into()
    }
    pub fn listing_url_template() -> String {
        "https://www.3suisses.fr/C-6176038-canapes--fauteuils.htm?page={page}".into()
    }
    pub fn start_page() -> u32 {
        1
    }
    pub fn end_page() -> u32 {
        11
    }

    // Sheets defaults
    pub fn sheet_range() -> String {
        "Sheet1".into()
    }
    pub fn token_env() -> String {
        "GOOGLE_SHEETS_TOKEN".into()
    }
    pub fn sheets_api_base() -> String {
        "https://sheets.googleapis.com/v4/spreadsheets".into()
    }

    // Mirror defaults
    pub fn mirror_enabled() -> bool {
        false
    }
    pub fn remote_dir() -> String {
        "images_trois_suisses".into()
    }
}
