//! HTML parsing: SEO field extraction and link discovery
//!
//! This module handles parsing fetched HTML to extract:
//! - The SEO fields persisted per page (title, first h1, meta description)
//! - Links to follow during discovery

use crate::storage::PageRecord;
use crate::SeolensError;
use chrono::Utc;
use scraper::{Html, Selector};
use url::Url;

/// Capability interface for turning a fetched page into a page record
///
/// Kept as a trait so tests can substitute failing or canned parsers
/// without touching the crawl core. A returned error counts as a scrape
/// failure for that item.
pub trait PageParser: Send + Sync {
    fn extract_fields(
        &self,
        url: &str,
        status_code: u16,
        body: &str,
    ) -> Result<PageRecord, SeolensError>;
}

/// Default parser extracting title, first h1, and meta description
pub struct SeoParser;

impl PageParser for SeoParser {
    fn extract_fields(
        &self,
        url: &str,
        status_code: u16,
        body: &str,
    ) -> Result<PageRecord, SeolensError> {
        let document = Html::parse_document(body);

        Ok(PageRecord {
            url: url.to_string(),
            title: select_text(&document, "title"),
            h1: select_text(&document, "h1"),
            meta_description: select_meta_description(&document),
            status_code,
            crawled_at: Utc::now().to_rfc3339(),
        })
    }
}

/// Extracts the trimmed text of the first element matching `selector`
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the content attribute of `<meta name="description">`
fn select_meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name='description']").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts all followable links from an HTML body
///
/// Links are resolved against `base_url` and filtered:
///
/// **Include:** `<a href="...">` resolving to an HTTP(S) URL.
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:`, `data:` schemes,
/// fragment-only anchors, and `<a ... download>` links.
///
/// Parse problems degrade to "no links found" - this function never
/// fails the caller.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    let document = Html::parse_document(html);

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only anchors
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
