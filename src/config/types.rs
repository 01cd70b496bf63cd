use serde::Deserialize;

/// Main configuration structure for Seolens
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// The URL discovery starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of pages admitted for crawling
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Number of concurrent scrape workers
    #[serde(rename = "worker-count", default = "default_worker_count")]
    pub worker_count: usize,

    /// Capacity of the discovery-to-worker hand-off queue
    #[serde(rename = "worklist-capacity", default = "default_worklist_capacity")]
    pub worklist_capacity: usize,

    /// Per-request timeout during the discovery phase (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Per-request timeout during the scrape phase (seconds)
    #[serde(rename = "scrape-timeout-secs", default = "default_scrape_timeout")]
    pub scrape_timeout_secs: u64,
}

fn default_worker_count() -> usize {
    5
}

fn default_worklist_capacity() -> usize {
    100
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_scrape_timeout() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}
