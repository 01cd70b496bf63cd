//! Seolens: a concurrent SEO crawler
//!
//! This crate implements a web crawler that discovers pages reachable from a
//! seed URL, extracts SEO fields (title, first heading, meta description)
//! with a pool of concurrent workers, and persists page records and crawl
//! statistics to SQLite.

pub mod config;
pub mod crawler;
pub mod storage;

use thiserror::Error;

/// Main error type for Seolens operations
#[derive(Debug, Error)]
pub enum SeolensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP {status_code} for {url}")]
    HttpStatus { url: String, status_code: u16 },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

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

/// Result type alias for Seolens operations
pub type Result<T> = std::result::Result<T, SeolensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, run_crawl, CrawlReport, Frontier, PageParser, ScrapeStats, SeoParser};
pub use storage::{CrawlStatsRecord, PageRecord, SqliteStorage, Store};
