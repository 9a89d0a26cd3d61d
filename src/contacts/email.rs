use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is a valid regex")
});

/// Image suffixes that make an address-shaped token a false positive
/// (retina asset names such as `logo@2x.png`)
const IMAGE_SUFFIXES: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".ico", ".bmp", ".tiff",
];

/// Returns false for candidates that are really image file names
pub fn is_valid_email(candidate: &str) -> bool {
    let lowered = candidate.to_ascii_lowercase();
    !IMAGE_SUFFIXES
        .iter()
        .any(|suffix| lowered.ends_with(suffix))
}

/// Extracts the address from a `mailto:` link target
///
/// The scheme prefix is matched case-insensitively; any `?subject=...` part is
/// discarded. Returns None for anything that is not a non-empty mail link.
///
/// # Examples
///
/// ```
/// use contacts_parser::contacts::mailto_address;
///
/// assert_eq!(
///     mailto_address("mailto:info@example.com?subject=Hi"),
///     Some("info@example.com".to_string())
/// );
/// assert_eq!(mailto_address("https://example.com/"), None);
/// ```
pub fn mailto_address(value: &str) -> Option<String> {
    let target = strip_scheme(value, "mailto:")?;
    let address = target.split('?').next().unwrap_or_default().trim();

    if address.is_empty() {
        None
    } else {
        Some(address.to_string())
    }
}

/// Finds address-shaped tokens in free text, dropping image false positives
pub fn find_emails(text: &str) -> BTreeSet<String> {
    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| is_valid_email(candidate))
        .map(str::to_string)
        .collect()
}

/// Strips a scheme prefix ignoring ASCII case
pub(crate) fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let value = value.trim_start();
    let prefix = value.get(..scheme.len())?;

    if prefix.eq_ignore_ascii_case(scheme) {
        Some(&value[scheme.len()..])
    } else {
        None
    }
}
