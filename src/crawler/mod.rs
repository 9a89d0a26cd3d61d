//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with classified failures
//! - HTML parsing into owned pages
//! - The breadth-first frontier
//! - Overall crawl coordination and result assembly

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod result;

pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{build_http_client, Fetcher, RawPage};
pub use frontier::Frontier;
pub use parser::{parse_html, AttributeValue, LinkAttribute, ParsedPage};
pub use result::{CrawlReport, ParserResult};
