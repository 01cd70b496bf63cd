//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{CrawlStatsRecord, PageRecord};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A store shared between concurrent workers
///
/// The mutex gives the store a single-writer discipline; workers take the
/// lock only for the duration of one statement.
pub type SharedStore = Arc<Mutex<dyn Storage + Send>>;

/// Trait for storage backend implementations
///
/// This trait defines all database operations needed by the crawler. It is
/// object-safe so tests can substitute an alternate backend without touching
/// the crawl core.
pub trait Storage {
    /// Inserts a page record, or updates the existing row with the same URL
    ///
    /// Calling twice with records sharing a URL results in one stored row
    /// carrying the later record's fields.
    fn upsert_page(&mut self, page: &PageRecord) -> StorageResult<()>;

    /// Gets a page record by URL
    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRecord>>;

    /// Gets total page count
    fn count_pages(&self) -> StorageResult<u64>;

    /// Gets page counts grouped by HTTP status code
    fn status_breakdown(&self) -> StorageResult<Vec<(u16, u64)>>;

    /// Records the final statistics of a crawl run
    fn record_crawl_stats(&mut self, stats: &CrawlStatsRecord) -> StorageResult<()>;

    /// Gets the most recently recorded crawl statistics
    fn latest_crawl_stats(&self) -> StorageResult<Option<CrawlStatsRecord>>;
}
