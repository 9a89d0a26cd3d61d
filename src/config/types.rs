use crate::config::validation::validate;
use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: f64 = 5.0;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_SECONDS: f64 = 0.2;
pub const DEFAULT_MIN_DELAY_SECONDS: f64 = 0.0;
pub const DEFAULT_USER_AGENT: &str = "contacts-parser/0.1";
pub const DEFAULT_MAX_WORKERS: usize = 8;
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Main configuration structure for contacts-parser
///
/// Every key is optional; a missing table or key falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub crawler: CrawlerConfig,
}

impl Config {
    /// Converts the file settings into the values the crawler runs with
    ///
    /// Validates first, so a returned `CrawlConfig` always holds real durations.
    pub fn crawl_config(&self) -> Result<CrawlConfig, ConfigError> {
        validate(self)?;

        Ok(CrawlConfig {
            timeout: seconds("timeout-seconds", self.http.timeout_seconds)?,
            max_retries: self.http.max_retries,
            backoff: seconds("backoff-seconds", self.http.backoff_seconds)?,
            min_delay: seconds("min-delay-seconds", self.http.min_delay_seconds)?,
            user_agent: self.http.user_agent.clone(),
            max_workers: self.crawler.max_workers,
            max_pages: self.crawler.max_pages,
        })
    }
}

fn seconds(key: &str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| ConfigError::Validation(format!("{}: {}", key, e)))
}

/// HTTP client behavior
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: f64,

    /// Retries after the first attempt for transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Constant wait between retries, in seconds
    #[serde(rename = "backoff-seconds")]
    pub backoff_seconds: f64,

    /// Delay before every request, in seconds
    #[serde(rename = "min-delay-seconds")]
    pub min_delay_seconds: f64,

    /// Value of the User-Agent header
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_seconds: DEFAULT_BACKOFF_SECONDS,
            min_delay_seconds: DEFAULT_MIN_DELAY_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages fetched concurrently
    #[serde(rename = "max-workers")]
    pub max_workers: usize,

    /// Maximum number of pages stored per run
    #[serde(rename = "max-pages")]
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Settings of a single crawl, in the units the crawler works with
///
/// Built from a [`Config`] via [`Config::crawl_config`], or directly by
/// library callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff: Duration,
    pub min_delay: Duration,
    pub user_agent: String,
    pub max_workers: usize,
    pub max_pages: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_secs_f64(DEFAULT_BACKOFF_SECONDS),
            min_delay: Duration::ZERO,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_workers: DEFAULT_MAX_WORKERS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}
