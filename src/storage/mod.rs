//! Storage module for persisting crawl data
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - Page record persistence (idempotent upsert by URL)
//! - Crawl statistics recording

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{SharedStore, Storage as Store, StorageError, StorageResult};

use crate::SeolensError;
use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage, SeolensError> {
    SqliteStorage::new(path)
}

/// An SEO page record extracted by a worker
///
/// Created fresh per scrape, owned by the worker until handed to the
/// store, discarded after persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub title: Option<String>,
    pub h1: Option<String>,
    pub meta_description: Option<String>,
    pub status_code: u16,
    pub crawled_at: String,
}

/// Final statistics for one crawl run, recorded exactly once at shutdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatsRecord {
    pub seed_url: String,
    pub total_pages: u64,
    pub success_pages: u64,
    pub failed_pages: u64,
    pub duration_secs: i64,
    pub config_hash: String,
    pub recorded_at: String,
}
