//! Final record of a crawl run

use crate::state::{CrawlState, PageStore};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Immutable summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserResult {
    url: String,
    base_url: String,
    pages_parsed: usize,
    pages_skipped: usize,
    emails: Vec<String>,
    phones: Vec<String>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl ParserResult {
    /// Packages the accumulated state of a run
    ///
    /// Emails and phones come out sorted, as they are kept in ordered sets.
    pub(crate) fn assemble(
        url: String,
        base_url: String,
        state: &CrawlState,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url,
            base_url,
            pages_parsed: state.pages_parsed(),
            pages_skipped: state.pages_skipped(),
            emails: state.emails().iter().cloned().collect(),
            phones: state.phones().iter().cloned().collect(),
            started_at,
            finished_at,
        }
    }

    /// Normalized seed URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Origin the crawl was confined to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pages_parsed(&self) -> usize {
        self.pages_parsed
    }

    /// Pages given up on (HTTP 403/404 or retries exhausted)
    pub fn pages_skipped(&self) -> usize {
        self.pages_skipped
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    /// Wall-clock time between run start and traversal end
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }

    /// Duration in fractional seconds
    pub fn duration_seconds(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 1000.0
    }
}

/// A [`ParserResult`] together with every page that was stored
#[derive(Debug)]
pub struct CrawlReport {
    result: ParserResult,
    pages: PageStore,
}

impl CrawlReport {
    pub(crate) fn new(result: ParserResult, pages: PageStore) -> Self {
        Self { result, pages }
    }

    pub fn result(&self) -> &ParserResult {
        &self.result
    }

    /// Fetched pages keyed by normalized URL
    pub fn pages(&self) -> &PageStore {
        &self.pages
    }

    /// Splits the report into its summary and page store
    pub fn into_parts(self) -> (ParserResult, PageStore) {
        (self.result, self.pages)
    }
}
