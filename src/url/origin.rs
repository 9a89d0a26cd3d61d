use crate::url::normalize::normalize_url;
use crate::UrlError;
use url::Url;

/// Computes the crawl origin ("base URL") of a URL
///
/// The origin is the normalized URL reduced to scheme, host and any
/// non-default port, with the path forced to `/`. Query, fragment and
/// credentials are dropped.
///
/// # Examples
///
/// ```
/// use contacts_parser::url::origin_of;
///
/// assert_eq!(origin_of("https://example.com/sub/page").unwrap(), "https://example.com/");
/// ```
pub fn origin_of(raw: &str) -> Result<String, UrlError> {
    let normalized = normalize_url(raw)?;
    let url = Url::parse(&normalized).map_err(|e| UrlError::Parse(e.to_string()))?;

    let host = url.host_str().ok_or(UrlError::MissingDomain)?;

    let mut origin = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        origin.push_str(&format!(":{}", port));
    }
    origin.push('/');

    Ok(origin)
}

/// Returns true if a normalized URL lies under the given origin
pub fn is_within_origin(normalized_url: &str, origin: &str) -> bool {
    normalized_url.starts_with(origin)
}
