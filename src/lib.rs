//! contacts-parser: a same-origin contact crawler
//!
//! This crate crawls a website from a seed URL, stays under the seed's origin,
//! and collects the email addresses and phone numbers found on every page.

pub mod config;
pub mod contacts;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Top-level error type for contacts-parser operations
#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Errors a crawl run can end with
///
/// The caller of [`crawler::Crawler::run`] only ever sees `InvalidUrl` or
/// `Permanent`. `Transient` and `NoContent` are contained per page, and
/// `MaxPagesReached` ends the run successfully.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Transient failure for {url}: {reason}")]
    Transient { url: String, reason: String },

    #[error("No content at {url} (HTTP {status})")]
    NoContent { url: String, status: u16 },

    #[error("Permanent failure for {url}: {reason}")]
    Permanent { url: String, reason: String },

    #[error("Page budget of {limit} pages reached")]
    MaxPagesReached { limit: usize },
}

/// Classified outcome of a failed fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network, timeout, 429 or 5xx failure. Safe to retry.
    #[error("Transient failure for {url}: {reason}")]
    Transient { url: String, reason: String },

    /// HTTP 403 or 404. Skip the page, do not retry.
    #[error("No content at {url} (HTTP {status})")]
    NoContent { url: String, status: u16 },

    /// Any other HTTP error status. Retrying won't help.
    #[error("Permanent failure for {url}: {reason}")]
    Permanent { url: String, reason: String },
}

impl From<FetchError> for CrawlError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transient { url, reason } => CrawlError::Transient { url, reason },
            FetchError::NoContent { url, status } => CrawlError::NoContent { url, status },
            FetchError::Permanent { url, reason } => CrawlError::Permanent { url, reason },
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidOverride { key: String, value: String },
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for contacts-parser operations
pub type Result<T> = std::result::Result<T, ContactsError>;

/// Result type alias for crawl operations
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use contacts::{extract_contacts, Contacts};
pub use crawler::{CrawlReport, Crawler, ParserResult};
pub use state::CrawlStatus;
pub use crate::url::{normalize_url, origin_of};
