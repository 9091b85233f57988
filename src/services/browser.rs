// src/services/browser.rs

//! Headless Chromium rendering session.
//!
//! Pages that fill prices and delivery estimates from scripts only expose
//! them after a real browser has run the page. One session owns one tab,
//! reused for every URL of a phase.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, PageDocument};
use crate::services::Renderer;

pub struct BrowserSession {
    browser: Mutex<Browser>,
    page: Page,
    events: JoinHandle<()>,
    remote: bool,
    timeout: Duration,
    settle: Duration,
}

impl BrowserSession {
    /// Launch a local browser, or attach to `browser_url` when configured.
    pub async fn launch(config: &CrawlerConfig) -> Result<Self> {
        let (browser, mut handler) = match &config.browser_url {
            Some(url) => {
                log::info!("Connecting to remote browser at {}", url);
                Browser::connect(url.as_str()).await?
            }
            None => {
                let browser_config = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(Duration::from_secs(config.timeout_secs))
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage")
                    .build()
                    .map_err(AppError::config)?;
                Browser::launch(browser_config).await?
            }
        };

        // The handler stream drives the DevTools connection; nothing works
        // unless it is polled.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        page.set_user_agent(config.user_agent.as_str()).await?;
        log::debug!("Opened browser session (timeout {}s)", config.timeout_secs);

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            events,
            remote: config.browser_url.is_some(),
            timeout: Duration::from_secs(config.timeout_secs),
            settle: Duration::from_millis(config.render_wait_ms),
        })
    }
}

#[async_trait]
impl Renderer for BrowserSession {
    async fn render(&self, url: &str) -> Result<PageDocument> {
        let navigation = async {
            self.page.goto(url).await?;
            tokio::time::sleep(self.settle).await;
            Ok::<_, CdpError>(self.page.content().await?)
        };

        let html = tokio::time::timeout(self.timeout, navigation)
            .await
            .map_err(|_| {
                AppError::render(url, format!("timed out after {}s", self.timeout.as_secs()))
            })?
            .map_err(|e| AppError::render(url, e))?;

        Ok(PageDocument::from_url(url, html))
    }

    /// Closes the tab of a remote browser, or the whole local browser.
    async fn close(&self) -> Result<()> {
        if self.remote {
            self.page.clone().close().await?;
        } else {
            let mut browser = self.browser.lock().await;
            browser.close().await?;
            if let Err(e) = browser.wait().await {
                log::debug!("Browser process did not exit cleanly: {}", e);
            }
        }
        self.events.abort();
        log::debug!("Closed browser session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_unreachable_remote_browser_fails_to_open() {
        let config = CrawlerConfig {
            browser_url: Some("ws://127.0.0.1:1/devtools/browser/none".to_string()),
            ..CrawlerConfig::default()
        };

        assert!(BrowserSession::launch(&config).await.is_err());
    }

    #[tokio::test]
    #[ignore = "needs a local Chrome or Chromium"]
    async fn test_render_returns_script_filled_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/p/sofa-42"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"<html><body><script>
                     const price = document.createElement("span");
                     price.className = "dyn_prod_price";
                     price.textContent = "399.00";
                     document.body.appendChild(price);
                   </script></body></html>"#,
                "text/html",
            ))
            .mount(&server)
            .await;

        let session = BrowserSession::launch(&CrawlerConfig::default())
            .await
            .unwrap();
        let url = format!("{}/p/sofa-42", server.uri());
        let doc = session.render(&url).await.unwrap();
        session.close().await.unwrap();

        assert!(doc.html().contains(r#"<span class="dyn_prod_price">399.00</span>"#));
        assert_eq!(doc.source().to_string(), url);
    }
}
