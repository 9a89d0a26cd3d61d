use crate::config::types::{Config, CrawlConfig, CrawlerConfig, HttpConfig};
use crate::ConfigError;
use std::time::Duration;

/// Upper bound on concurrently fetched pages
pub const MAX_WORKERS_LIMIT: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_crawler_config(&config.crawler)?;
    Ok(())
}

/// Validates HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    validate_positive_seconds("timeout-seconds", config.timeout_seconds)?;
    validate_positive_seconds("backoff-seconds", config.backoff_seconds)?;

    if !config.min_delay_seconds.is_finite() || config.min_delay_seconds < 0.0 {
        return Err(ConfigError::Validation(format!(
            "min-delay-seconds must be a finite number >= 0, got {}",
            config.min_delay_seconds
        )));
    }

    validate_user_agent(&config.user_agent)
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_pages >= 0 is always true for usize; 0 means "fetch nothing"
    validate_max_workers(config.max_workers)
}

/// Validates settings handed straight to the crawler
pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.timeout.is_zero() {
        return Err(ConfigError::Validation(
            "timeout must be greater than zero".to_string(),
        ));
    }

    if config.backoff.is_zero() {
        return Err(ConfigError::Validation(
            "backoff must be greater than zero".to_string(),
        ));
    }

    validate_max_workers(config.max_workers)?;
    validate_user_agent(&config.user_agent)
}

fn validate_positive_seconds(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "{} must be a finite number > 0, got {}",
            key, value
        )));
    }

    // Anything Duration cannot hold is not a usable timeout either
    Duration::try_from_secs_f64(value).map_err(|_| {
        ConfigError::Validation(format!("{} is out of range, got {}", key, value))
    })?;

    Ok(())
}

fn validate_max_workers(max_workers: usize) -> Result<(), ConfigError> {
    if !(1..=MAX_WORKERS_LIMIT).contains(&max_workers) {
        return Err(ConfigError::Validation(format!(
            "max-workers must be between 1 and {}, got {}",
            MAX_WORKERS_LIMIT, max_workers
        )));
    }

    Ok(())
}

fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
