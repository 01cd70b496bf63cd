//! Worker pool: fetch, parse, persist
//!
//! A fixed number of workers drain the worklist. Each pops one item at a
//! time, fetches it under the scrape-phase timeout, extracts SEO fields
//! through the `PageParser` collaborator, and upserts the record through
//! the store. Per-item failures are counted and logged, never propagated:
//! one failing page must not abort the pool.

use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::parser::PageParser;
use crate::crawler::stats::ScrapeStats;
use crate::crawler::WorkItem;
use crate::storage::SharedStore;
use crate::SeolensError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

/// Shared state for all workers of one crawl run
pub(crate) struct WorkerContext {
    pub client: Client,
    pub parser: Arc<dyn PageParser>,
    pub store: SharedStore,
    pub stats: Arc<ScrapeStats>,
    pub scrape_timeout: Duration,
}

/// Runs one worker until the worklist is closed and drained
///
/// The receiver lock is held only while waiting for an item, never across
/// the fetch, so workers scrape concurrently.
pub(crate) async fn run_worker(
    id: usize,
    ctx: Arc<WorkerContext>,
    worklist: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
) {
    loop {
        let item = { worklist.lock().await.recv().await };

        let Some(item) = item else {
            break;
        };

        ctx.stats.record_attempt();

        match scrape(&ctx, &item.url).await {
            Ok(()) => ctx.stats.record_success(),
            Err(e) => {
                ctx.stats.record_failure();
                tracing::warn!("Failed to scrape {}: {}", item.url, e);
            }
        }
    }

    tracing::debug!("Worker {} exiting", id);
}

/// Scrapes a single URL: fetch, extract fields, persist
async fn scrape(ctx: &WorkerContext, url: &str) -> Result<(), SeolensError> {
    let (status_code, body) = match fetch_page(&ctx.client, url, ctx.scrape_timeout).await {
        FetchOutcome::Success {
            status_code, body, ..
        } => (status_code, body),
        FetchOutcome::HttpError { status_code } => {
            return Err(SeolensError::HttpStatus {
                url: url.to_string(),
                status_code,
            })
        }
        FetchOutcome::NetworkError { error } => {
            return Err(SeolensError::Fetch {
                url: url.to_string(),
                reason: error,
            })
        }
    };

    let record = ctx.parser.extract_fields(url, status_code, &body)?;

    let mut store = ctx.store.lock().unwrap();
    store.upsert_page(&record)?;

    Ok(())
}
