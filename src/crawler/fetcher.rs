//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with the configured user agent and timeout
//! - The global minimum delay before every request
//! - GET requests returning the raw response body
//! - Classifying failures into transient, no-content and permanent outcomes
//!
//! Retries are not performed here; the coordinator decides what to do with a
//! classified failure.

use crate::FetchError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Upper bound on the TCP/TLS connect phase
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw response of a successful fetch
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Response body, undecoded
    pub body: Vec<u8>,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header
/// * `timeout` - Total per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use contacts_parser::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("contacts-parser/0.1", Duration::from_secs(5)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages with a global throttle and classified failures
///
/// Cloning is cheap: the underlying client shares its connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    min_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher over an existing client
    pub fn new(client: Client, min_delay: Duration) -> Self {
        Self { client, min_delay }
    }

    /// Fetches a URL and returns the raw body
    ///
    /// # Classification
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | Connect / TLS / timeout error | Transient |
    /// | HTTP 403, 404 | NoContent |
    /// | HTTP 429, 500, 502, 503, 504 | Transient |
    /// | Any other HTTP 4xx/5xx | Permanent |
    /// | Any other transport error | Transient |
    ///
    /// # Arguments
    ///
    /// * `url` - The normalized URL to fetch
    pub async fn fetch(&self, url: &str) -> Result<RawPage, FetchError> {
        if !self.min_delay.is_zero() {
            tokio::time::sleep(self.min_delay).await;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(url, &e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(classify_status(url, status));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(url, &e))?;

        Ok(RawPage {
            url: final_url,
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }
}

/// Maps an HTTP error status to its fetch outcome
pub(crate) fn classify_status(url: &str, status: StatusCode) -> FetchError {
    let code = status.as_u16();

    match code {
        403 | 404 => FetchError::NoContent {
            url: url.to_string(),
            status: code,
        },
        429 | 500 | 502 | 503 | 504 => FetchError::Transient {
            url: url.to_string(),
            reason: format!("HTTP {}", code),
        },
        _ => FetchError::Permanent {
            url: url.to_string(),
            reason: format!("HTTP {}", code),
        },
    }
}

/// Maps a transport-level failure to its fetch outcome
///
/// Every transport failure is retryable; the reason only differs for logging.
fn classify_transport_error(url: &str, error: &reqwest::Error) -> FetchError {
    let reason = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_body() || error.is_decode() {
        format!("Failed to read body: {}", error)
    } else {
        error.to_string()
    };

    FetchError::Transient {
        url: url.to_string(),
        reason,
    }
}
