//! HTTP fetcher implementation
//!
//! This module performs the crawler's network retrievals. A fetch never
//! fails with an error: non-success statuses and transport errors come back
//! as `FetchResult` variants so callers can skip the page and carry on.

use reqwest::Client;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the page body for successful fetches
    pub fn into_body(self) -> Option<String> {
        match self {
            FetchResult::Success { body } => Some(body),
            _ => None,
        }
    }
}

/// Builds the HTTP client shared by every fetch of a run
///
/// No custom headers or timeouts are configured; the transport defaults
/// apply.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().gzip(true).brotli(true).build()
}

/// Fetches a URL with a single GET request
///
/// Logs the URL on success and on failure. There is no retry.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult carrying the body or the kind of failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            tracing::warn!("Failed to fetch URL: {} ({})", url, error);
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Failed to fetch URL: {} (HTTP {})", url, status.as_u16());
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    if response.url().as_str() != url {
        tracing::debug!("{} redirected to {}", url, response.url());
    }

    match response.text().await {
        Ok(body) => {
            tracing::info!("Fetched {} successfully", url);
            FetchResult::Success { body }
        }
        Err(e) => {
            tracing::warn!("Failed to fetch URL: {} ({})", url, e);
            FetchResult::NetworkError {
                error: e.to_string(),
            }
        }
    }
}
