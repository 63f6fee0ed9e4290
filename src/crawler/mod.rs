//! Crawler module for hymn discovery and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - Listing-page link extraction and hymn-page parsing
//! - Per-hymn extraction tasks
//! - Overall crawl coordination and partial saves on cancellation

mod coordinator;
mod extractor;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use extractor::{extract_hymn, HymnOutcome};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{extract_hymn_links, parse_hymn_page, split_refrain, HymnalMarkup, REFRAIN_LABEL};

use crate::config::Config;
use crate::HymnalError;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl until it finishes or `cancel` fires
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Fetch every listing page of the crawl space in order
/// 3. Extract each discovered hymn concurrently
/// 4. Write the collected hymns to the configured output file
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl finished or was cancelled; output written
/// * `Err(HymnalError)` - Client setup or the output write failed
pub async fn crawl(config: Config, cancel: CancellationToken) -> Result<CrawlOutcome, HymnalError> {
    run_crawl(config, cancel).await
}
