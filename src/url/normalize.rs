use crate::UrlError;
use url::Url;

/// Normalizes a URL into its single canonical crawl form
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Parse the URL; reject relative, scheme-relative or malformed input
/// 3. Accept only `http` and `https` schemes
/// 4. Require a non-empty host
/// 5. Remove the `www.` prefix from the host (prefix only)
/// 6. Empty path becomes `/`
/// 7. Remove fragment (everything after #)
/// 8. Remove any `user:password@` credentials
///
/// The query string is kept, so `/page?a=1` and `/page?a=2` stay distinct.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(String)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or validate the URL
///
/// # Examples
///
/// ```
/// use contacts_parser::url::normalize_url;
///
/// let url = normalize_url("https://www.example.com/contact#team").unwrap();
/// assert_eq!(url, "https://example.com/contact");
/// ```
pub fn normalize_url(raw: &str) -> Result<String, UrlError> {
    let raw = raw.trim();

    let mut url = Url::parse(raw).map_err(|e| UrlError::Parse(format!("'{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => return Err(UrlError::MissingDomain),
    };

    // Stripping repeatedly keeps normalization idempotent for "www.www.host"
    let mut stripped = host.as_str();
    while let Some(rest) = stripped.strip_prefix("www.") {
        stripped = rest;
    }

    if stripped.len() != host.len() {
        if stripped.is_empty() {
            return Err(UrlError::MissingDomain);
        }
        url.set_host(Some(stripped))
            .map_err(|e| UrlError::Malformed(format!("Failed to set host: {}", e)))?;
    }

    if url.path().is_empty() {
        url.set_path("/");
    }

    url.set_fragment(None);

    if !url.username().is_empty() || url.password().is_some() {
        url.set_username("")
            .and_then(|_| url.set_password(None))
            .map_err(|_| UrlError::Malformed(format!("Failed to drop credentials from '{}'", raw)))?;
    }

    Ok(url.into())
}
