//! Output module for presenting crawl results
//!
//! This module handles:
//! - Printing a result summary to the console
//! - Writing a Markdown report of a run

mod console;
mod markdown;

pub use console::{format_summary, print_result};
pub use markdown::{format_markdown_report, write_markdown_report};

use thiserror::Error;

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
