//! Discovery engine: recursive link exploration
//!
//! Discovery starts at the seed URL and spawns one task per URL it wants
//! to visit. Each branch asks the frontier for admission, fetches the
//! page, hands the URL to the worker pool over the bounded worklist, and
//! spawns a child branch per extracted link until the frontier saturates.
//!
//! Quiescence is detected through the worklist's sender count: every
//! branch owns a `Sender` clone, created by its parent *before* the task
//! is spawned and dropped when the branch returns. The channel therefore
//! closes exactly when the seed branch and all of its descendants have
//! terminated - never earlier, because a parent still holds its own
//! sender while cloning for a child, and never later than the last
//! branch's return. Workers observe closure as `recv()` returning `None`.

use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::crawler::WorkItem;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

/// Shared state for all discovery branches of one crawl run
pub(crate) struct DiscoveryContext {
    pub client: Client,
    pub frontier: Arc<Frontier>,
    pub fetch_timeout: Duration,
}

/// Starts a new concurrent discovery branch for `url`
///
/// The branch owns the `worklist` sender it is handed; dropping it on
/// return is what lets the worklist close once discovery is quiescent.
pub(crate) fn spawn_branch(
    ctx: Arc<DiscoveryContext>,
    url: String,
    worklist: mpsc::Sender<WorkItem>,
) {
    tokio::spawn(async move {
        visit(ctx, url, worklist).await;
    });
}

/// Visits one URL: admit, fetch, hand off, recurse into links
///
/// Any fetch error or non-success status silently terminates the branch:
/// no work item, no children, no statistics (statistics cover only the
/// worker phase).
async fn visit(ctx: Arc<DiscoveryContext>, url: String, worklist: mpsc::Sender<WorkItem>) {
    if !ctx.frontier.try_admit(&url) {
        return;
    }

    let body = match fetch_page(&ctx.client, &url, ctx.fetch_timeout).await {
        FetchOutcome::Success { body, .. } => body,
        FetchOutcome::HttpError { status_code } => {
            tracing::debug!("Discovery dropped {} (HTTP {})", url, status_code);
            return;
        }
        FetchOutcome::NetworkError { error } => {
            tracing::debug!("Discovery dropped {} ({})", url, error);
            return;
        }
    };

    // Hand off before following children; blocks when the worklist is
    // full, which backpressures the whole branch.
    if worklist.send(WorkItem { url: url.clone() }).await.is_err() {
        return;
    }

    let base = match Url::parse(&url) {
        Ok(base) => base,
        Err(e) => {
            tracing::debug!("Cannot re-parse {} as a base URL: {}", url, e);
            return;
        }
    };

    for link in extract_links(&body, &base) {
        if ctx.frontier.is_saturated() {
            break;
        }
        spawn_branch(Arc::clone(&ctx), link, worklist.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserAgentConfig;
    use crate::crawler::fetcher::build_http_client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_context(frontier: Frontier) -> Arc<DiscoveryContext> {
        let client = build_http_client(&UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        })
        .unwrap();

        Arc::new(DiscoveryContext {
            client,
            frontier: Arc::new(frontier),
            fetch_timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn test_rejected_branch_emits_nothing_and_closes_worklist() {
        let ctx = test_context(Frontier::new(0));
        let (tx, mut rx) = mpsc::channel::<WorkItem>(4);

        spawn_branch(ctx, "https://example.com/".to_string(), tx);

        // No admission, no fetch, no item; channel closes when the branch drops its sender
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_successful_branch_emits_one_item_then_closes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>no links here</body></html>"),
            )
            .mount(&mock_server)
            .await;

        let ctx = test_context(Frontier::new(10));
        let (tx, mut rx) = mpsc::channel::<WorkItem>(4);
        let seed = format!("{}/", mock_server.uri());

        spawn_branch(ctx, seed.clone(), tx);

        let item = rx.recv().await.expect("one work item");
        assert_eq!(item.url, seed);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_emits_no_item() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let ctx = test_context(Frontier::new(10));
        let frontier = Arc::clone(&ctx.frontier);
        let (tx, mut rx) = mpsc::channel::<WorkItem>(4);

        spawn_branch(ctx, format!("{}/", mock_server.uri()), tx);

        assert!(rx.recv().await.is_none());
        // The URL was still admitted; failures do not free admissions
        assert_eq!(frontier.admitted_count(), 1);
    }
}
