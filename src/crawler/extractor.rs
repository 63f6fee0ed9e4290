//! Hymn extraction task
//!
//! One call per discovered hymn link: fetch the detail page, parse it, and
//! report what happened. Fetch failures and malformed pages are contained
//! here and never reach sibling tasks.

use crate::crawler::fetcher::fetch_url;
use crate::crawler::parser::{parse_hymn_page, HymnalMarkup};
use crate::hymn::HymnRecord;
use crate::ExtractError;
use reqwest::Client;

/// What a single extraction produced
#[derive(Debug)]
pub enum HymnOutcome {
    /// The hymn was extracted
    Extracted(HymnRecord),

    /// The detail page could not be fetched
    Skipped,

    /// The detail page was fetched but did not have the expected shape
    Failed(ExtractError),
}

/// Fetches and extracts one hymn
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The hymn's detail-page URL
///
/// # Returns
///
/// The outcome of the extraction; this never fails
pub async fn extract_hymn(client: &Client, url: &str) -> HymnOutcome {
    let Some(body) = fetch_url(client, url).await.into_body() else {
        return HymnOutcome::Skipped;
    };

    match parse_hymn_page(HymnalMarkup::shared(), &body, url) {
        Ok(record) => {
            tracing::info!("Finished hymn {}", record.number);
            HymnOutcome::Extracted(record)
        }
        Err(e) => {
            tracing::warn!("Skipping hymn: {}", e);
            HymnOutcome::Failed(e)
        }
    }
}
