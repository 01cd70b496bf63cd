//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Seolens database.

use rusqlite::Connection;

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Scraped SEO page records, one row per URL
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    title TEXT,
    h1 TEXT,
    meta_description TEXT,
    status_code INTEGER NOT NULL,
    crawled_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pages_status ON pages(status_code);

-- One row per completed crawl run
CREATE TABLE IF NOT EXISTS crawl_stats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    seed_url TEXT NOT NULL,
    total_pages INTEGER NOT NULL,
    success_pages INTEGER NOT NULL,
    failed_pages INTEGER NOT NULL,
    duration_secs INTEGER NOT NULL,
    config_hash TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
