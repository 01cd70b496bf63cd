//! Crawler module: discovery, scraping, and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - Frontier deduplication with a bounded admission cap
//! - Recursive concurrent link discovery
//! - A fixed-size worker pool draining a bounded worklist
//! - Quiescence-based shutdown and final statistics recording

mod discovery;
mod fetcher;
mod frontier;
mod parser;
mod stats;
mod worker;

pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::Frontier;
pub use parser::{extract_links, PageParser, SeoParser};
pub use stats::{ScrapeStats, StatsSnapshot};

use crate::config::Config;
use crate::storage::{CrawlStatsRecord, SharedStore, SqliteStorage};
use crate::SeolensError;
use chrono::Utc;
use discovery::DiscoveryContext;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use worker::WorkerContext;

/// A URL handed from discovery to the worker pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub url: String,
}

/// Outcome of one completed crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The URL the crawl started from
    pub seed_url: String,
    /// URLs admitted by the frontier
    pub pages_admitted: usize,
    /// Work items popped by workers
    pub attempted: u64,
    /// Pages scraped and persisted
    pub succeeded: u64,
    /// Pages that failed to fetch, parse, or persist
    pub failed: u64,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// Runs a complete crawl against the given collaborators
///
/// This is the core orchestration, blocking until the run is done:
///
/// 1. Validate the configuration (a non-positive worker count or page cap
///    is rejected here, before any work starts)
/// 2. Build the HTTP client
/// 3. Start the worker pool (workers block on the empty worklist)
/// 4. Spawn the seed discovery branch
/// 5. Wait for the pool to drain the worklist after discovery quiesces
/// 6. Record final statistics through the store, exactly once
///
/// Per-item scrape failures never surface here; only configuration and
/// statistics-persistence errors do.
pub async fn run_crawl(
    config: &Config,
    store: SharedStore,
    parser: Arc<dyn PageParser>,
    config_hash: &str,
) -> Result<CrawlReport, SeolensError> {
    crate::config::validate(config)?;

    let seed_url = config.crawler.seed_url.clone();
    tracing::info!(
        "Starting crawl of {} (max {} pages, {} workers)",
        seed_url,
        config.crawler.max_pages,
        config.crawler.worker_count
    );

    let start_time = Instant::now();
    let client = build_http_client(&config.user_agent)?;
    let frontier = Arc::new(Frontier::new(config.crawler.max_pages));
    let stats = Arc::new(ScrapeStats::new());

    let (worklist_tx, worklist_rx) = mpsc::channel::<WorkItem>(config.crawler.worklist_capacity);
    let worklist_rx = Arc::new(tokio::sync::Mutex::new(worklist_rx));

    // Workers first, so discovery never fills the worklist against an
    // absent consumer.
    let worker_ctx = Arc::new(WorkerContext {
        client: client.clone(),
        parser,
        store: Arc::clone(&store),
        stats: Arc::clone(&stats),
        scrape_timeout: Duration::from_secs(config.crawler.scrape_timeout_secs),
    });

    let mut pool = JoinSet::new();
    for id in 0..config.crawler.worker_count {
        pool.spawn(worker::run_worker(
            id,
            Arc::clone(&worker_ctx),
            Arc::clone(&worklist_rx),
        ));
    }

    let discovery_ctx = Arc::new(DiscoveryContext {
        client,
        frontier: Arc::clone(&frontier),
        fetch_timeout: Duration::from_secs(config.crawler.fetch_timeout_secs),
    });

    // The seed branch takes ownership of our only sender; once it and
    // every descendant branch have returned, the worklist closes and the
    // workers drain whatever is left.
    discovery::spawn_branch(discovery_ctx, seed_url.clone(), worklist_tx);

    while let Some(joined) = pool.join_next().await {
        if let Err(e) = joined {
            tracing::error!("Worker task panicked: {}", e);
        }
    }

    let snapshot = stats.snapshot();
    let duration = start_time.elapsed();
    let report = CrawlReport {
        seed_url: seed_url.clone(),
        pages_admitted: frontier.admitted_count(),
        attempted: snapshot.attempted,
        succeeded: snapshot.succeeded,
        failed: snapshot.failed,
        duration,
    };

    {
        let mut store = store.lock().unwrap();
        store.record_crawl_stats(&CrawlStatsRecord {
            seed_url,
            total_pages: snapshot.attempted,
            success_pages: snapshot.succeeded,
            failed_pages: snapshot.failed,
            duration_secs: duration.as_secs() as i64,
            config_hash: config_hash.to_string(),
            recorded_at: Utc::now().to_rfc3339(),
        })?;
    }

    tracing::info!(
        "Crawl complete: {} succeeded, {} failed in {:?}",
        report.succeeded,
        report.failed,
        report.duration
    );

    Ok(report)
}

/// Runs the main crawl operation against SQLite storage
///
/// This is the entry point used by the CLI. It opens (or creates) the
/// configured database - a storage initialization failure is fatal and
/// aborts before discovery or workers start - and delegates to
/// [`run_crawl`] with the default SEO parser.
pub async fn crawl(config: Config, config_hash: &str) -> Result<CrawlReport, SeolensError> {
    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
    let store: SharedStore = Arc::new(std::sync::Mutex::new(storage));

    run_crawl(&config, store, Arc::new(SeoParser), config_hash).await
}
