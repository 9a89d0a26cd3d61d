//! Configuration module for contacts-parser
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, plus environment-variable overrides. Every key has a default, so
//! an empty file (or no file at all) is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use contacts_parser::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("contacts.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, CrawlerConfig, HttpConfig, DEFAULT_BACKOFF_SECONDS, DEFAULT_MAX_PAGES,
    DEFAULT_MAX_RETRIES, DEFAULT_MAX_WORKERS, DEFAULT_MIN_DELAY_SECONDS, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{apply_env_overrides, load_config, load_config_from_env};
pub use validation::{validate, validate_crawl_config, MAX_WORKERS_LIMIT};
