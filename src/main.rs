//! contacts-parser main entry point
//!
//! This is the command-line interface for the contacts-parser crawler.

use anyhow::{Context, Result};
use clap::Parser;
use contacts_parser::config::{load_config, load_config_from_env, Config};
use contacts_parser::crawler::Crawler;
use contacts_parser::output::{print_result, write_markdown_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// contacts-parser: collect emails and phone numbers from a website
///
/// Crawls every page under the origin of the given URL, breadth first, and
/// prints the email addresses and phone numbers found along the way.
#[derive(Parser, Debug)]
#[command(name = "contacts-parser")]
#[command(version)]
#[command(about = "Collect contacts from a website", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Also write a Markdown report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match load(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let crawler = Crawler::new(config.crawl_config()?).context("Failed to set up crawler")?;

    // Run the crawler
    let result = match crawler.run(&cli.url).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if !cli.quiet {
        print_result(&result);
    }

    if let Some(path) = &cli.report {
        write_markdown_report(&result, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!("Report written to: {}", path.display());
    }

    Ok(())
}

/// Loads the config file if one was given, otherwise defaults plus environment
fn load(cli: &Cli) -> std::result::Result<Config, contacts_parser::ConfigError> {
    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
        }
        None => load_config_from_env(),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contacts_parser=info,warn"),
            1 => EnvFilter::new("contacts_parser=debug,info"),
            2 => EnvFilter::new("contacts_parser=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
