// src/services/renderer.rs

//! Page rendering and download capabilities.
//!
//! The pipeline only sees the [`Renderer`] and [`Downloader`] traits; a
//! session is opened by whoever owns a phase and closed when it ends.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, PageDocument};
use crate::utils::http;

/// Produces the page source for a URL.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<PageDocument>;

    /// Release the session. Called once at the end of a phase.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: Renderer + ?Sized> Renderer for Arc<T> {
    async fn render(&self, url: &str) -> Result<PageDocument> {
        (**self).render(url).await
    }

    async fn close(&self) -> Result<()> {
        (**self).close().await
    }
}

/// Fetches raw bytes for a URL.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP-backed rendering session.
#[derive(Clone)]
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    /// Open a session. Failure here is fatal for the phase.
    pub fn open(config: &CrawlerConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        log::debug!("Opened HTTP session (timeout {}s)", config.timeout_secs);
        Ok(Self { client })
    }
}

#[async_trait]
impl Renderer for HttpSession {
    async fn render(&self, url: &str) -> Result<PageDocument> {
        let html = http::fetch_text(&self.client, url)
            .await
            .map_err(|e| AppError::render(url, e))?;
        Ok(PageDocument::from_url(url, html))
    }

    async fn close(&self) -> Result<()> {
        log::debug!("Closed HTTP session");
        Ok(())
    }
}

#[async_trait]
impl Downloader for HttpSession {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        http::fetch_bytes(&self.client, url).await
    }
}
