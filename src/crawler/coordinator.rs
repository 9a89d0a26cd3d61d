//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop, including:
//! - Seed validation and origin computation
//! - Managing the frontier and a bounded pool of page tasks
//! - The fetch-one-page protocol with retries for transient failures
//! - Merging pages and contacts into the shared state
//! - Assembling the final result

use crate::config::{validate_crawl_config, CrawlConfig};
use crate::contacts::extract_contacts;
use crate::crawler::fetcher::{build_http_client, Fetcher, RawPage};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::crawler::result::{CrawlReport, ParserResult};
use crate::state::{CrawlStatus, SharedState};
use crate::url::{crawl_candidate, normalize_url, origin_of};
use crate::{CrawlError, CrawlResult, FetchError};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// Stored pages between progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// Crawls a single site and collects its contacts
///
/// A `Crawler` holds configuration and the HTTP client only. Every call to
/// [`Crawler::run`] or [`Crawler::crawl`] works on fresh state, so one
/// crawler can be reused for several seeds.
#[derive(Debug, Clone)]
pub struct Crawler {
    config: CrawlConfig,
    fetcher: Fetcher,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `config` - Settings for every run of this crawler
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(ContactsError::Config)` - The settings are out of range
    /// * `Err(ContactsError::Crawl)` - The HTTP client could not be built
    pub fn new(config: CrawlConfig) -> crate::Result<Self> {
        validate_crawl_config(&config)?;

        let client = build_http_client(&config.user_agent, config.timeout).map_err(|e| {
            CrawlError::Permanent {
                url: String::new(),
                reason: format!("Failed to build HTTP client: {}", e),
            }
        })?;
        let fetcher = Fetcher::new(client, config.min_delay);

        Ok(Self { config, fetcher })
    }

    /// Settings this crawler runs with
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `seed` and returns the summary
    ///
    /// # Returns
    ///
    /// * `Ok(ParserResult)` - Frontier drained or page budget reached
    /// * `Err(CrawlError::InvalidUrl)` - The seed is not a crawlable URL; no
    ///   request was made
    /// * `Err(CrawlError::Permanent)` - A page failed in a way retrying cannot
    ///   fix; in-flight work was cancelled
    pub async fn run(&self, seed: &str) -> CrawlResult<ParserResult> {
        let report = self.crawl(seed).await?;
        let (result, _pages) = report.into_parts();
        Ok(result)
    }

    /// Crawls from `seed` and returns the summary plus every stored page
    pub async fn crawl(&self, seed: &str) -> CrawlResult<CrawlReport> {
        let started_at = Utc::now();
        let status = CrawlStatus::Idle;

        let seed_url = normalize_url(seed).map_err(|e| {
            tracing::error!("Rejecting seed {}: {}", seed.trim(), e);
            CrawlError::from(e)
        })?;
        let origin = origin_of(&seed_url)?;

        let status = advance(status, CrawlStatus::Running, &seed_url)?;
        tracing::info!(
            "Starting crawl of {} (origin {}, {} workers, {} page budget)",
            seed_url,
            origin,
            self.config.max_workers,
            self.config.max_pages
        );

        let shared = SharedState::new();
        let outcome = self.traverse(&seed_url, &origin, &shared).await;
        let finished_at = Utc::now();

        if let Err(e) = outcome {
            let status = advance(status, CrawlStatus::Aborted, &seed_url)?;
            tracing::error!("Crawl {}: {}", status, e);
            return Err(e);
        }

        let status = advance(status, CrawlStatus::Completed, &seed_url)?;
        let state = shared.into_inner();
        let result = ParserResult::assemble(seed_url, origin, &state, started_at, finished_at);

        tracing::info!(
            "Crawl {}: {} pages parsed, {} skipped, {} emails, {} phones in {:.2}s",
            status,
            result.pages_parsed(),
            result.pages_skipped(),
            result.emails().len(),
            result.phones().len(),
            result.duration_seconds()
        );

        Ok(CrawlReport::new(result, state.into_pages()))
    }

    /// Drives the breadth-first traversal until nothing is left to do
    ///
    /// The frontier is owned by this task alone; workers report discovered
    /// links back through their join results.
    async fn traverse(&self, seed: &str, origin: &str, shared: &SharedState) -> CrawlResult<()> {
        let max_pages = self.config.max_pages;
        let mut frontier = Frontier::with_seed(seed);
        let mut tasks: JoinSet<CrawlResult<PageOutcome>> = JoinSet::new();
        let worker = PageWorker {
            fetcher: self.fetcher.clone(),
            shared: shared.clone(),
            origin: Arc::from(origin),
            max_pages,
            max_retries: self.config.max_retries,
            backoff: self.config.backoff,
        };

        let start_time = Instant::now();
        let mut budget_exhausted = false;
        let mut stored = 0usize;

        loop {
            // Top up the pool without overshooting the page budget
            while !budget_exhausted && tasks.len() < self.config.max_workers {
                if shared.pages_parsed() + tasks.len() >= max_pages {
                    break;
                }

                let Some(url) = frontier.next_url() else {
                    break;
                };

                tracing::debug!("Scheduling {}", url);
                let worker = worker.clone();
                tasks.spawn(async move { worker.process(url).await });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };

            match joined {
                Ok(Ok(PageOutcome::Stored { url, links })) => {
                    let accepted = frontier.offer_all(links);
                    tracing::debug!("{}: {} new links queued", url, accepted);

                    stored += 1;
                    if stored % PROGRESS_INTERVAL == 0 {
                        let rate = stored as f64 / start_time.elapsed().as_secs_f64();
                        tracing::info!(
                            "Progress: {} pages parsed, {} in frontier, {:.2} pages/sec",
                            stored,
                            frontier.len(),
                            rate
                        );
                    }
                }

                Ok(Ok(PageOutcome::Skipped)) => {}

                Ok(Err(CrawlError::MaxPagesReached { limit })) => {
                    if !budget_exhausted {
                        tracing::info!("Page budget of {} reached, finishing in-flight pages", limit);
                    }
                    budget_exhausted = true;
                }

                Ok(Err(e)) => {
                    tasks.abort_all();
                    return Err(e);
                }

                Err(e) if e.is_cancelled() => {}

                Err(e) => {
                    tasks.abort_all();
                    return Err(CrawlError::Permanent {
                        url: origin.to_string(),
                        reason: format!("Page task panicked: {}", e),
                    });
                }
            }
        }

        if !frontier.is_empty() {
            tracing::debug!("{} queued URLs left unfetched", frontier.len());
        }

        Ok(())
    }
}

/// Applies a status change, treating a rejected one as fatal
fn advance(from: CrawlStatus, to: CrawlStatus, seed: &str) -> CrawlResult<CrawlStatus> {
    let next = from.transition_to(to).map_err(|e| CrawlError::Permanent {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    if next.is_terminal() {
        tracing::debug!("Crawl of {} is final: {}", seed, next);
    }
    Ok(next)
}

/// What a finished page task hands back to the coordinator
#[derive(Debug)]
enum PageOutcome {
    /// Page stored; `links` are its in-origin crawl candidates
    Stored { url: String, links: Vec<String> },

    /// NoContent, exhausted retries, or already stored
    Skipped,
}

/// Everything a page task needs, cloned into each task
#[derive(Debug, Clone)]
struct PageWorker {
    fetcher: Fetcher,
    shared: SharedState,
    origin: Arc<str>,
    max_pages: usize,
    max_retries: u32,
    backoff: Duration,
}

impl PageWorker {
    /// Fetches, parses and stores one page
    ///
    /// Only `MaxPagesReached` and `Permanent` come back as errors.
    async fn process(self, url: String) -> CrawlResult<PageOutcome> {
        self.shared.check_budget(self.max_pages)?;

        let raw = match self.fetch_with_retry(&url).await {
            Ok(raw) => raw,
            Err(FetchError::NoContent { status, .. }) => {
                tracing::warn!("Skipping {}: HTTP {}", url, status);
                self.shared.record_skip();
                return Ok(PageOutcome::Skipped);
            }
            Err(FetchError::Transient { reason, .. }) => {
                tracing::warn!(
                    "Skipping {} after {} attempts: {}",
                    url,
                    self.max_retries + 1,
                    reason
                );
                self.shared.record_skip();
                return Ok(PageOutcome::Skipped);
            }
            Err(e @ FetchError::Permanent { .. }) => return Err(e.into()),
        };

        if raw.url != url {
            tracing::debug!("{} redirected to {}", url, raw.url);
        }

        let page = parse_html(&raw.body);
        let contacts = extract_contacts(&page);
        let links = self.discover_links(&url, page.link_values());

        if contacts.is_empty() {
            tracing::debug!(
                "Parsed {} (HTTP {}, {}): no contacts, {} candidate links",
                url,
                raw.status,
                raw.content_type.as_deref().unwrap_or("no content type"),
                links.len()
            );
        } else {
            tracing::debug!(
                "Parsed {} (HTTP {}, {}): {} emails, {} phones, {} candidate links",
                url,
                raw.status,
                raw.content_type.as_deref().unwrap_or("no content type"),
                contacts.emails.len(),
                contacts.phones.len(),
                links.len()
            );
        }

        if !self
            .shared
            .record_page(url.clone(), page, contacts, self.max_pages)
        {
            self.shared.check_budget(self.max_pages)?;
            tracing::debug!("{} already stored", url);
            return Ok(PageOutcome::Skipped);
        }

        Ok(PageOutcome::Stored { url, links })
    }

    /// Fetches a URL, retrying transient failures after a constant backoff
    ///
    /// Makes at most `max_retries + 1` attempts.
    async fn fetch_with_retry(&self, url: &str) -> Result<RawPage, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            match self.fetcher.fetch(url).await {
                Err(FetchError::Transient { reason, .. }) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Transient failure for {} (attempt {}/{}): {}",
                        url,
                        attempt,
                        self.max_retries + 1,
                        reason
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                other => return other,
            }
        }
    }

    /// Resolves every link value against the page and keeps crawl candidates
    ///
    /// Relative links resolve against the URL that was requested, even when
    /// the response came from a redirect target.
    fn discover_links<'a>(&self, url: &str, values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let base = match Url::parse(url) {
            Ok(base) => base,
            Err(e) => {
                tracing::debug!("Cannot resolve links on {}: {}", url, e);
                return Vec::new();
            }
        };

        values
            .filter_map(|value| crawl_candidate(value, &base, &self.origin))
            .collect()
    }
}

/// Runs a complete crawl with a freshly built crawler
///
/// # Arguments
///
/// * `config` - Crawl settings
/// * `seed` - Starting URL; its origin bounds the crawl
///
/// # Example
///
/// ```no_run
/// use contacts_parser::config::CrawlConfig;
/// use contacts_parser::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = run_crawl(CrawlConfig::default(), "https://example.com/").await?;
/// println!("{} pages, {} emails", result.pages_parsed(), result.emails().len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: CrawlConfig, seed: &str) -> crate::Result<ParserResult> {
    let crawler = Crawler::new(config)?;
    Ok(crawler.run(seed).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContactsError, UrlError};

    fn test_config() -> CrawlConfig {
        CrawlConfig {
            timeout: Duration::from_secs(2),
            backoff: Duration::from_millis(10),
            max_workers: 2,
            max_pages: 10,
            ..CrawlConfig::default()
        }
    }

    #[test]
    fn test_crawler_creation() {
        let crawler = Crawler::new(test_config()).unwrap();
        assert_eq!(crawler.config().max_workers, 2);
    }

    #[test]
    fn test_crawler_rejects_invalid_config() {
        let config = CrawlConfig {
            max_workers: 0,
            ..test_config()
        };
        assert!(matches!(
            Crawler::new(config),
            Err(ContactsError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_seed_rejected() {
        let crawler = Crawler::new(test_config()).unwrap();

        for seed in ["", "not a url", "ftp://example.com/", "//example.com/a", "/relative"] {
            let result = crawler.run(seed).await;
            assert!(
                matches!(result, Err(CrawlError::InvalidUrl(_))),
                "seed {:?} should be rejected",
                seed
            );
        }

        assert!(matches!(
            crawler.run("mailto:someone@example.com").await,
            Err(CrawlError::InvalidUrl(UrlError::InvalidScheme(_)))
        ));
    }

    #[tokio::test]
    async fn test_zero_budget_makes_no_requests() {
        let config = CrawlConfig {
            max_pages: 0,
            ..test_config()
        };
        let crawler = Crawler::new(config).unwrap();

        // Nothing listens here; any request would be counted as skipped
        let result = crawler.run("http://127.0.0.1:9/start").await.unwrap();

        assert_eq!(result.url(), "http://127.0.0.1:9/start");
        assert_eq!(result.base_url(), "http://127.0.0.1:9/");
        assert_eq!(result.pages_parsed(), 0);
        assert_eq!(result.pages_skipped(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_seed_is_skipped() {
        let config = CrawlConfig {
            max_retries: 1,
            ..test_config()
        };
        let crawler = Crawler::new(config).unwrap();

        let result = crawler.run("http://127.0.0.1:9/").await.unwrap();
        assert_eq!(result.pages_parsed(), 0);
        assert_eq!(result.pages_skipped(), 1);
    }

    #[test]
    fn test_advance_rejects_backwards_transition() {
        let result = advance(CrawlStatus::Completed, CrawlStatus::Running, "https://example.com/");
        assert!(matches!(result, Err(CrawlError::Permanent { .. })));
    }
}
