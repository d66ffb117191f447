//! Sumi-Outline: a structured-page crawler
//!
//! This crate crawls web pages breadth-first from seed URLs and turns each
//! rendered page into an outline: a forest of titled sections keyed by heading
//! level, each holding the cleaned text that belongs to it.

pub mod config;
pub mod crawler;
pub mod outline;
pub mod output;
pub mod page;
pub mod summarizer;
pub mod transcript;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Outline operations
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rewrite failed for {url}: {source}")]
    Rewrite {
        url: String,
        source: summarizer::SummarizerError,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Recoverable page fetch failures. A task that hits one of these is dropped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    NotHtml { url: String, content_type: String },

    #[error("Empty page body for {url}")]
    Empty { url: String },
}

/// Result type alias for Sumi-Outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlController, CrawlPolicy, CrawlResult, RunAborted, RunResult};
pub use outline::{build_outline, clean_text, DocumentNode};
