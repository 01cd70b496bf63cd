//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::storage::{CrawlStatsRecord, PageRecord};
use crate::SeolensError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(SeolensError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, SeolensError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    ///
    /// Useful for tests and ephemeral runs; nothing survives the process.
    pub fn new_in_memory() -> Result<Self, SeolensError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn upsert_page(&mut self, page: &PageRecord) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO pages (url, title, h1, meta_description, status_code, crawled_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(url) DO UPDATE SET
                 title = excluded.title,
                 h1 = excluded.h1,
                 meta_description = excluded.meta_description,
                 status_code = excluded.status_code,
                 crawled_at = excluded.crawled_at",
            params![
                page.url,
                page.title,
                page.h1,
                page.meta_description,
                page.status_code,
                page.crawled_at
            ],
        )?;
        Ok(())
    }

    fn get_page_by_url(&self, url: &str) -> StorageResult<Option<PageRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, title, h1, meta_description, status_code, crawled_at
             FROM pages WHERE url = ?1",
        )?;

        let page = stmt
            .query_row(params![url], |row| {
                Ok(PageRecord {
                    url: row.get(0)?,
                    title: row.get(1)?,
                    h1: row.get(2)?,
                    meta_description: row.get(3)?,
                    status_code: row.get(4)?,
                    crawled_at: row.get(5)?,
                })
            })
            .optional()?;

        Ok(page)
    }

    fn count_pages(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn status_breakdown(&self) -> StorageResult<Vec<(u16, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT status_code, COUNT(*) FROM pages GROUP BY status_code ORDER BY status_code",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, u16>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn record_crawl_stats(&mut self, stats: &CrawlStatsRecord) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO crawl_stats
                 (seed_url, total_pages, success_pages, failed_pages, duration_secs, config_hash, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                stats.seed_url,
                stats.total_pages as i64,
                stats.success_pages as i64,
                stats.failed_pages as i64,
                stats.duration_secs,
                stats.config_hash,
                stats.recorded_at
            ],
        )?;
        Ok(())
    }

    fn latest_crawl_stats(&self) -> StorageResult<Option<CrawlStatsRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT seed_url, total_pages, success_pages, failed_pages, duration_secs, config_hash, recorded_at
             FROM crawl_stats ORDER BY id DESC LIMIT 1",
        )?;

        let stats = stmt
            .query_row([], |row| {
                Ok(CrawlStatsRecord {
                    seed_url: row.get(0)?,
                    total_pages: row.get::<_, i64>(1)? as u64,
                    success_pages: row.get::<_, i64>(2)? as u64,
                    failed_pages: row.get::<_, i64>(3)? as u64,
                    duration_secs: row.get(4)?,
                    config_hash: row.get(5)?,
                    recorded_at: row.get(6)?,
                })
            })
            .optional()?;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_page(url: &str, title: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: Some(title.to_string()),
            h1: Some("Heading".to_string()),
            meta_description: Some("Description".to_string()),
            status_code: 200,
            crawled_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_upsert_and_get_page() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let page = sample_page("https://example.com/", "Home");

        storage.upsert_page(&page).unwrap();

        let loaded = storage.get_page_by_url("https://example.com/").unwrap();
        assert_eq!(loaded, Some(page));
    }

    #[test]
    fn test_upsert_is_idempotent_by_url() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        storage
            .upsert_page(&sample_page("https://example.com/", "First"))
            .unwrap();
        storage
            .upsert_page(&sample_page("https://example.com/", "Second"))
            .unwrap();

        // One row, carrying the later record's fields
        assert_eq!(storage.count_pages().unwrap(), 1);
        let loaded = storage
            .get_page_by_url("https://example.com/")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.title, Some("Second".to_string()));
    }

    #[test]
    fn test_get_missing_page_returns_none() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        let loaded = storage.get_page_by_url("https://nowhere.example/").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_status_breakdown() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        let mut ok = sample_page("https://example.com/a", "A");
        ok.status_code = 200;
        storage.upsert_page(&ok).unwrap();

        let mut ok2 = sample_page("https://example.com/b", "B");
        ok2.status_code = 200;
        storage.upsert_page(&ok2).unwrap();

        let mut gone = sample_page("https://example.com/c", "C");
        gone.status_code = 410;
        storage.upsert_page(&gone).unwrap();

        let breakdown = storage.status_breakdown().unwrap();
        assert_eq!(breakdown, vec![(200, 2), (410, 1)]);
    }

    #[test]
    fn test_record_and_load_crawl_stats() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        assert!(storage.latest_crawl_stats().unwrap().is_none());

        let stats = CrawlStatsRecord {
            seed_url: "https://example.com/".to_string(),
            total_pages: 10,
            success_pages: 8,
            failed_pages: 2,
            duration_secs: 42,
            config_hash: "abc123".to_string(),
            recorded_at: Utc::now().to_rfc3339(),
        };

        storage.record_crawl_stats(&stats).unwrap();

        let loaded = storage.latest_crawl_stats().unwrap();
        assert_eq!(loaded, Some(stats));
    }

    #[test]
    fn test_latest_crawl_stats_returns_most_recent() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        for total in [1u64, 2, 3] {
            storage
                .record_crawl_stats(&CrawlStatsRecord {
                    seed_url: "https://example.com/".to_string(),
                    total_pages: total,
                    success_pages: total,
                    failed_pages: 0,
                    duration_secs: 1,
                    config_hash: "abc123".to_string(),
                    recorded_at: Utc::now().to_rfc3339(),
                })
                .unwrap();
        }

        let loaded = storage.latest_crawl_stats().unwrap().unwrap();
        assert_eq!(loaded.total_pages, 3);
    }
}
