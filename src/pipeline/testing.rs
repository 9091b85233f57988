// src/pipeline/testing.rs

//! Recording fakes for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::PageDocument;
use crate::services::{Renderer, SheetSink};

/// Serves canned pages; any other URL is a render failure.
#[derive(Default)]
pub struct FakeRenderer {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
    closes: AtomicUsize,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn render(&self, url: &str) -> Result<PageDocument> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .map(|html| PageDocument::from_url(url, html.clone()))
            .ok_or_else(|| AppError::render(url, "navigation timed out"))
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records appended rows, optionally rejecting all of them.
#[derive(Default)]
pub struct FakeSheet {
    rows: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl FakeSheet {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SheetSink for FakeSheet {
    async fn append_row(&self, row: &[String]) -> Result<()> {
        self.rows.lock().unwrap().push(row.to_vec());
        if self.fail {
            return Err(AppError::sheet("quota exceeded"));
        }
        Ok(())
    }
}

/// A listing page with one product tile per href.
pub fn listing_html(hrefs: &[&str]) -> String {
    let tiles: String = hrefs
        .iter()
        .map(|href| format!(r#"<div class="col-3 item__wrapper"><a href="{href}">item</a></div>"#))
        .collect();
    format!("<html><body><div class=\"row\">{tiles}</div></body></html>")
}

/// A detail page with the fields the default selectors expect.
pub fn detail_html(
    title: &str,
    price: &str,
    image_href: &str,
    delivery: &str,
    stock: Option<&str>,
) -> String {
    let stock = stock
        .map(|s| format!(r#"<span class="small-stock product__stock--nb">{s}</span>"#))
        .unwrap_or_default();
    format!(
        r#"<html><head><title>{title}</title></head><body>
        <div class="owl-item"><ul><li><a href="{image_href}"><img></a></li></ul></div>
        <span class="dyn_prod_price">{price}</span>
        <span class="dyn_time_fret">{delivery}</span>
        {stock}
        </body></html>"#
    )
}
