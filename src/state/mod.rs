//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlStatus`: lifecycle of a single run (idle, running, completed, aborted)
//! - `CrawlState`: the pages and contacts a run has accumulated
//! - `SharedState`: the mutex-guarded handle workers use to update it

mod crawl_state;
mod crawl_status;

// Re-export main types
pub use crawl_state::{CrawlState, PageRecord, PageStore, SharedState};
pub use crawl_status::{CrawlStatus, InvalidTransition};
