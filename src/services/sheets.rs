// src/services/sheets.rs

//! Spreadsheet sink.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::SheetsConfig;

/// Appends rows to a remote spreadsheet.
#[async_trait]
pub trait SheetSink: Send + Sync {
    async fn append_row(&self, row: &[String]) -> Result<()>;
}

/// Google Sheets `values:append` client.
pub struct GoogleSheetsClient {
    client: Client,
    api_base: String,
    spreadsheet_id: String,
    range: String,
    token: String,
}

impl GoogleSheetsClient {
    pub fn new(client: Client, config: &SheetsConfig, token: impl Into<String>) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            range: config.range.clone(),
            token: token.into(),
        }
    }

    /// Build a client with the bearer token read from `config.token_env`.
    pub fn from_env(client: Client, config: &SheetsConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env).map_err(|_| {
            AppError::config(format!(
                "spreadsheet token variable {} is not set",
                config.token_env
            ))
        })?;
        Ok(Self::new(client, config, token))
    }

    fn append_url(&self) -> String {
        format!(
            "{}/{}/values/{}:append",
            self.api_base, self.spreadsheet_id, self.range
        )
    }
}

#[async_trait]
impl SheetSink for GoogleSheetsClient {
    async fn append_row(&self, row: &[String]) -> Result<()> {
        let body = json!({ "values": [row] });

        let response = self
            .client
            .post(self.append_url())
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::sheet(format!("append returned {status}: {detail}")));
        }
        Ok(())
    }
}
