use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;
use std::str::FromStr;

pub const ENV_TIMEOUT_SECONDS: &str = "HTTP_TIMEOUT_SECONDS";
pub const ENV_MAX_RETRIES: &str = "HTTP_MAX_RETRIES";
pub const ENV_BACKOFF_SECONDS: &str = "HTTP_BACKOFF_SECONDS";
pub const ENV_MIN_DELAY_SECONDS: &str = "HTTP_MIN_DELAY_SECONDS";
pub const ENV_USER_AGENT: &str = "HTTP_USER_AGENT";
pub const ENV_MAX_WORKERS: &str = "CRAWLER_MAX_WORKERS";
pub const ENV_MAX_PAGES: &str = "MAX_PAGES_DEEP";

/// Loads and parses a configuration file from the given path
///
/// Environment overrides are applied on top of the file before validation.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use contacts_parser::config::load_config;
///
/// let config = load_config(Path::new("contacts.toml")).unwrap();
/// println!("Max pages: {}", config.crawler.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let mut config: Config = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Builds a configuration from defaults plus environment overrides
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Overrides config values from environment-style variables
///
/// `lookup` returns the value of a variable, if set. Unset variables leave
/// the current value alone; values that do not parse are an error.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    override_value(&lookup, ENV_TIMEOUT_SECONDS, &mut config.http.timeout_seconds)?;
    override_value(&lookup, ENV_MAX_RETRIES, &mut config.http.max_retries)?;
    override_value(&lookup, ENV_BACKOFF_SECONDS, &mut config.http.backoff_seconds)?;
    override_value(
        &lookup,
        ENV_MIN_DELAY_SECONDS,
        &mut config.http.min_delay_seconds,
    )?;
    override_value(&lookup, ENV_MAX_WORKERS, &mut config.crawler.max_workers)?;
    override_value(&lookup, ENV_MAX_PAGES, &mut config.crawler.max_pages)?;

    if let Some(user_agent) = lookup(ENV_USER_AGENT) {
        config.http.user_agent = user_agent;
    }

    Ok(())
}

fn override_value<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return Ok(());
    };

    *target = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride {
            key: key.to_string(),
            value: raw.clone(),
        })?;

    tracing::debug!("Config override from {}: {}", key, raw.trim());
    Ok(())
}
