use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Optional country/trunk prefix, then a 3-3-2-2 national number with
/// optional spaces, hyphens and parentheses between the groups
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+7|7|8)?[\s\-()]*[0-9]{3}[\s\-()]*[0-9]{3}[\s\-]*[0-9]{2}[\s\-]*[0-9]{2}")
        .expect("phone pattern is a valid regex")
});

/// Reduces a raw phone string to its 10-digit subscriber number
///
/// Accepts 11 digits starting with `7` or `8` (country/trunk code dropped) and
/// 10 digits starting with `9`, `4` or `8`. Everything else is rejected.
pub fn subscriber_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match (digits.len(), digits.chars().next()) {
        (11, Some('7' | '8')) => Some(digits[1..].to_string()),
        (10, Some('9' | '4' | '8')) => Some(digits),
        _ => None,
    }
}

/// Normalizes a raw phone string into its three equivalent spellings
///
/// A recognised number yields `+7XXXXXXXXXX`, `7XXXXXXXXXX` and
/// `8XXXXXXXXXX`; anything else yields an empty set.
///
/// # Examples
///
/// ```
/// use contacts_parser::contacts::phone_variants;
///
/// let variants = phone_variants("+7 (999) 123-45-67");
/// assert!(variants.contains("+79991234567"));
/// assert!(variants.contains("79991234567"));
/// assert!(variants.contains("89991234567"));
/// ```
pub fn phone_variants(raw: &str) -> BTreeSet<String> {
    match subscriber_number(raw) {
        Some(core) => BTreeSet::from([
            format!("+7{}", core),
            format!("7{}", core),
            format!("8{}", core),
        ]),
        None => BTreeSet::new(),
    }
}

/// Finds phone-shaped tokens in free text and normalizes each
pub fn find_phones(text: &str) -> BTreeSet<String> {
    PHONE_PATTERN
        .find_iter(text)
        .flat_map(|m| phone_variants(m.as_str()))
        .collect()
}
