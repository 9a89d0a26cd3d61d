//! Contact extraction from parsed pages
//!
//! Emails and phone numbers are collected from two sources on each page:
//! - Structured links (`mailto:` hrefs, `tel:` hrefs and srcs)
//! - Pattern matches over the visible text joined with every `href`/`src`
//!   value, which catches addresses embedded in ordinary links
//!
//! Phone numbers are normalized into the three equivalent spellings of the
//! Russian national format (`+7…`, `7…`, `8…`).

mod email;
mod phone;

pub use email::{find_emails, is_valid_email, mailto_address};
pub use phone::{find_phones, phone_variants, subscriber_number};

use crate::crawler::{LinkAttribute, ParsedPage};
use serde::Serialize;
use std::collections::BTreeSet;

/// Contacts found on one or more pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contacts {
    pub emails: BTreeSet<String>,
    pub phones: BTreeSet<String>,
}

impl Contacts {
    /// Returns true if neither emails nor phones were found
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }

    /// Unions another set of contacts into this one
    pub fn merge(&mut self, other: &Contacts) {
        self.emails.extend(other.emails.iter().cloned());
        self.phones.extend(other.phones.iter().cloned());
    }
}

/// Extracts every email address and phone number from a parsed page
///
/// The result depends only on the page content, so repeated calls return
/// identical sets.
///
/// # Example
///
/// ```
/// use contacts_parser::contacts::extract_contacts;
/// use contacts_parser::crawler::parse_html;
///
/// let page = parse_html(br#"<a href="mailto:info@example.com">Mail</a><p>8 999 123 45 67</p>"#);
/// let contacts = extract_contacts(&page);
///
/// assert!(contacts.emails.contains("info@example.com"));
/// assert_eq!(contacts.phones.len(), 3);
/// ```
pub fn extract_contacts(page: &ParsedPage) -> Contacts {
    let mut contacts = Contacts::default();

    contacts.emails.extend(
        page.values_of(LinkAttribute::Href)
            .filter_map(mailto_address),
    );

    for value in page.link_values() {
        if let Some(number) = email::strip_scheme(value, "tel:") {
            let number = number.split('?').next().unwrap_or_default();
            contacts.phones.extend(phone_variants(number));
        }
    }

    let combined_text = combined_text(page);
    contacts.emails.extend(find_emails(&combined_text));
    contacts.phones.extend(find_phones(&combined_text));

    contacts
}

/// Visible text followed by every attribute value, space separated
fn combined_text(page: &ParsedPage) -> String {
    std::iter::once(page.text.as_str())
        .chain(page.link_values())
        .collect::<Vec<_>>()
        .join(" ")
}
