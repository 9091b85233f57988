// src/error.rs

//! Unified error handling for the crawler application.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// AWS S3 error
    #[cfg(feature = "s3")]
    #[error("S3 error: {0}")]
    S3(String),

    /// Browser automation failed
    #[cfg(feature = "browser")]
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The renderer could not produce a document
    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },

    /// Page cache slot could not be derived, read or written
    #[error("Cache error for {key}: {message}")]
    Cache { key: String, message: String },

    /// Spreadsheet append failed
    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    /// Remote file store rejected an upload
    #[error("Upload error for {path}: {message}")]
    Upload { path: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a render error for a URL.
    pub fn render(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Render {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a cache error for a slot key.
    pub fn cache(key: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Cache {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Create a spreadsheet error.
    pub fn sheet(message: impl fmt::Display) -> Self {
        Self::Sheet(message.to_string())
    }

    /// Create an upload error for a remote path.
    pub fn upload(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Upload {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
