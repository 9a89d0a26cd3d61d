//! HTML parser for extracting link attributes and visible text
//!
//! This module reduces a fetched document to the owned [`ParsedPage`] the rest
//! of the crawler works on:
//! - Every `href`/`src` attribute value, in document order
//! - The visible text of the page
//! - Page title

use scraper::{Html, Selector};

/// Elements whose text content is never rendered
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Which attribute a link value was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkAttribute {
    Href,
    Src,
}

/// A single `href` or `src` value found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    pub attribute: LinkAttribute,
    pub value: String,
}

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Visible text, whitespace runs collapsed to single spaces
    pub text: String,

    /// All `href`/`src` values on the page, unresolved
    pub attribute_values: Vec<AttributeValue>,
}

impl ParsedPage {
    /// Iterates over every `href` and `src` value on the page
    pub fn link_values(&self) -> impl Iterator<Item = &str> {
        self.attribute_values.iter().map(|a| a.value.as_str())
    }

    /// Iterates over the values of one attribute kind
    pub fn values_of(&self, attribute: LinkAttribute) -> impl Iterator<Item = &str> {
        self.attribute_values
            .iter()
            .filter(move |a| a.attribute == attribute)
            .map(|a| a.value.as_str())
    }
}

/// Parses a fetched document into a [`ParsedPage`]
///
/// Invalid UTF-8 sequences are replaced rather than rejected, and html5ever
/// recovers from any markup error, so parsing never fails.
///
/// # Example
///
/// ```
/// use contacts_parser::crawler::parse_html;
///
/// let html = br#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.link_values().collect::<Vec<_>>(), vec!["/page"]);
/// ```
pub fn parse_html(body: &[u8]) -> ParsedPage {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_visible_text(&document),
        attribute_values: extract_attribute_values(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Concatenates text nodes that are not inside script-like elements
///
/// Nodes are joined with no separator, so text split by inline markup such
/// as `info<span>@</span>example.com` stays contiguous. Whitespace runs are
/// then collapsed to single spaces.
fn extract_visible_text(document: &Html) -> String {
    let mut raw = String::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name().to_string()))
            .map(|name| INVISIBLE_ELEMENTS.contains(&name.as_str()))
            .unwrap_or(false);
        if hidden {
            continue;
        }

        raw.push_str(text);
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collects `href` then `src` from every element carrying either
fn extract_attribute_values(document: &Html) -> Vec<AttributeValue> {
    let mut values = Vec::new();

    if let Ok(selector) = Selector::parse("[href], [src]") {
        for element in document.select(&selector) {
            for (name, attribute) in [("href", LinkAttribute::Href), ("src", LinkAttribute::Src)] {
                if let Some(value) = element.value().attr(name) {
                    if !value.is_empty() {
                        values.push(AttributeValue {
                            attribute,
                            value: value.to_string(),
                        });
                    }
                }
            }
        }
    }

    values
}
