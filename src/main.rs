//! Hymnal Crawler main entry point
//!
//! This is the command-line interface for the hymnal crawler.

use clap::Parser;
use hymnal_crawler::config::{load_config_with_hash, validate, Config};
use hymnal_crawler::crawler::crawl;
use hymnal_crawler::url::page_addresses;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Hymnal Crawler: collects hymns from a paginated hymnal website
///
/// Walks every category listing page, extracts each hymn's number, title,
/// category, refrain and verses, and writes them to a JSON file. Press
/// Ctrl-C to stop early; the hymns collected so far are still saved.
#[derive(Parser, Debug)]
#[command(name = "hymnal-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Collects hymns from a paginated hymnal website", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write hymns to this file instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and list the listing pages that would be fetched
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics for an existing hymns file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.hymns_path = output.to_string_lossy().into_owned();
        validate(&config)?;
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hymnal_crawler=info,warn"),
            1 => EnvFilter::new("hymnal_crawler=debug,info"),
            2 => EnvFilter::new("hymnal_crawler=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Hymnal Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!(
        "  Pages per category: {}..={}",
        config.crawler.first_page, config.crawler.last_page
    );
    match config.crawler.max_concurrent_extractions {
        0 => println!("  Concurrent extractions: unbounded"),
        limit => println!("  Concurrent extractions: at most {}", limit),
    }

    println!("\nOutput:");
    println!("  Hymns file: {}", config.output.hymns_path);

    let addresses = page_addresses(&config.crawler);
    println!("\nListing pages ({}):", addresses.len());
    for address in &addresses {
        println!("  - {}", address.to_url(&config.crawler.base_url));
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: summarizes an existing hymns file
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use hymnal_crawler::output::{load_hymns_json, print_summary, summarize};

    let path = Path::new(&config.output.hymns_path);
    println!("Hymns file: {}\n", path.display());

    let records = load_hymns_json(path)?;
    print_summary(&summarize(&records));

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let cancel = CancellationToken::new();

    let signal_token = cancel.clone();
    tokio::spawn(async move {
        match watch_interrupts(tokio::signal::ctrl_c, signal_token).await {
            Ok(()) => {
                tracing::error!("Second interrupt received, exiting without saving");
                std::process::exit(130);
            }
            Err(e) => tracing::error!("Unable to listen for shutdown signal: {}", e),
        }
    });

    match crawl(config, cancel).await {
        Ok(outcome) => {
            if outcome.stats.cancelled {
                tracing::info!(
                    "Crawl interrupted, saved {} hymns",
                    outcome.records.len()
                );
            } else {
                tracing::info!(
                    "Crawl completed successfully with {} hymns",
                    outcome.records.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Cancels the crawl on the first interrupt and returns on the second
///
/// The caller decides what a second interrupt means; the binary exits
/// immediately so a stuck save can still be aborted.
async fn watch_interrupts<F, Fut>(
    mut next_interrupt: F,
    cancel: CancellationToken,
) -> std::io::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    next_interrupt().await?;
    tracing::warn!("Interrupt received, stopping crawl (press Ctrl-C again to exit immediately)");
    cancel.cancel();

    next_interrupt().await
}
