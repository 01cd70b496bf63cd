//! Frontier: the deduplication authority for the crawl
//!
//! The frontier decides, for every URL any discovery branch encounters,
//! whether that URL gets crawled. The duplicate check, the admission-cap
//! check, and the counter increment happen under one lock, so concurrent
//! branches can never admit the same URL twice or overshoot the cap.

use std::collections::HashSet;
use std::sync::Mutex;

struct FrontierInner {
    admitted: HashSet<String>,
    admitted_count: usize,
}

/// Tracks the set of URLs admitted for crawling in the current run
///
/// Scoped to exactly one crawl run; create a fresh instance per run.
pub struct Frontier {
    inner: Mutex<FrontierInner>,
    max_admissions: usize,
}

impl Frontier {
    /// Creates an empty frontier that will admit at most `max_admissions` URLs
    pub fn new(max_admissions: usize) -> Self {
        Self {
            inner: Mutex::new(FrontierInner {
                admitted: HashSet::new(),
                admitted_count: 0,
            }),
            max_admissions,
        }
    }

    /// Attempts to admit a URL for crawling
    ///
    /// Returns true and records the URL iff it was not previously admitted
    /// and the admission count is below the cap. Returns false otherwise,
    /// with no side effect. Once admitted, a URL is never un-admitted.
    pub fn try_admit(&self, url: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();

        if inner.admitted_count >= self.max_admissions || inner.admitted.contains(url) {
            return false;
        }

        inner.admitted.insert(url.to_string());
        inner.admitted_count += 1;
        true
    }

    /// Returns true once the admission cap has been reached
    ///
    /// Advisory only: callers use it to stop spawning branches early, but
    /// `try_admit` remains the authority.
    pub fn is_saturated(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.admitted_count >= self.max_admissions
    }

    /// Number of URLs admitted so far
    pub fn admitted_count(&self) -> usize {
        self.inner.lock().unwrap().admitted_count
    }
}
