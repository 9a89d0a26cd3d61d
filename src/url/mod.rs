//! URL handling module for contacts-parser
//!
//! This module provides URL normalization, crawl-origin computation and
//! resolution of links discovered on pages.

mod links;
mod normalize;
mod origin;

// Re-export main functions
pub use links::{is_static_asset, resolve_link};
pub use normalize::normalize_url;
pub use origin::{is_within_origin, origin_of};

use url::Url;

/// Turns a raw attribute value found on `page_url` into a crawl candidate
///
/// The value is resolved against the page, normalized, and kept only if it
/// lies under `origin` and is not a static asset. Values that fail any step
/// are dropped.
///
/// # Examples
///
/// ```
/// use contacts_parser::url::crawl_candidate;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/start").unwrap();
/// let origin = "https://example.com/";
///
/// assert_eq!(
///     crawl_candidate("/about#team", &page, origin),
///     Some("https://example.com/about".to_string())
/// );
/// assert_eq!(crawl_candidate("https://other.com/", &page, origin), None);
/// ```
pub fn crawl_candidate(raw: &str, page_url: &Url, origin: &str) -> Option<String> {
    let absolute = resolve_link(raw, page_url)?;

    let normalized = match normalize_url(&absolute) {
        Ok(n) => n,
        Err(e) => {
            tracing::debug!("Dropping link {}: {}", absolute, e);
            return None;
        }
    };

    if !is_within_origin(&normalized, origin) || is_static_asset(&normalized) {
        return None;
    }

    Some(normalized)
}
