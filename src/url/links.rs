use url::Url;

/// Path suffixes of resources that are never crawled as pages
const STATIC_ASSET_SUFFIXES: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".ico", ".bmp", ".tiff", ".css", ".js",
    ".mjs", ".woff", ".woff2", ".ttf", ".otf", ".eot", ".pdf", ".zip", ".gz", ".mp3", ".mp4",
    ".webm", ".avi", ".mov",
];

/// Schemes that never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Resolves a raw `href`/`src` value to an absolute URL
///
/// Returns None if the link should be excluded:
/// - empty values and fragment-only anchors
/// - javascript:, mailto:, tel: and data: values
/// - values that cannot be resolved against the page URL
/// - non-HTTP(S) URLs after resolution
///
/// # Arguments
///
/// * `href` - The attribute value as found in the document
/// * `page_url` - The URL of the page the value was found on
pub fn resolve_link(href: &str, page_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    match page_url.join(href) {
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

/// Returns true if the URL points at an image, stylesheet, script or other
/// non-page resource
pub fn is_static_asset(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_ascii_lowercase(),
        Err(_) => return false,
    };

    STATIC_ASSET_SUFFIXES
        .iter()
        .any(|suffix| path.ends_with(suffix))
}
