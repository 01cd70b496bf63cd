//! Seolens main entry point
//!
//! This is the command-line interface for the Seolens SEO crawler.

use anyhow::Context;
use clap::Parser;
use seolens::config::load_config_with_hash;
use seolens::crawler::crawl;
use seolens::storage::{open_storage, Store};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Seolens: a concurrent SEO crawler
///
/// Seolens crawls a website from a seed URL, extracts SEO fields from
/// every reachable page up to a configured cap, and stores page records
/// and crawl statistics in SQLite.
#[derive(Parser, Debug)]
#[command(name = "seolens")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent SEO crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, &config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seolens=info,warn"),
            1 => EnvFilter::new("seolens=debug,info"),
            2 => EnvFilter::new("seolens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &seolens::config::Config) {
    println!("=== Seolens Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Workers: {}", config.crawler.worker_count);
    println!("  Worklist capacity: {}", config.crawler.worklist_capacity);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Scrape timeout: {}s", config.crawler.scrape_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &seolens::config::Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(std::path::Path::new(&config.output.database_path))?;

    println!("=== Crawl Statistics ===\n");

    let total = storage.count_pages()?;
    println!("Pages stored: {}", total);

    let breakdown = storage.status_breakdown()?;
    if !breakdown.is_empty() {
        println!("\nPages by HTTP status:");
        for (status, count) in breakdown {
            println!("  {}: {}", status, count);
        }
    }

    match storage.latest_crawl_stats()? {
        Some(stats) => {
            println!("\nLast run ({}):", stats.recorded_at);
            println!("  Seed URL: {}", stats.seed_url);
            println!("  Attempted: {}", stats.total_pages);
            println!("  Succeeded: {}", stats.success_pages);
            println!("  Failed: {}", stats.failed_pages);
            println!("  Duration: {}s", stats.duration_secs);
        }
        None => println!("\nNo completed runs recorded"),
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: seolens::config::Config, config_hash: &str) -> anyhow::Result<()> {
    let report = crawl(config, config_hash).await?;

    println!(
        "Scraping complete! Success: {}, Failed: {}, Duration: {:?}",
        report.succeeded, report.failed, report.duration
    );

    Ok(())
}
