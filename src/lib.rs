//! Hymnal Crawler: a hymnal site scraper
//!
//! This crate walks the category listing pages of a paginated hymnal website,
//! extracts a structured record for every hymn it finds, and writes the whole
//! collection to a JSON file, including when the run is interrupted.

pub mod config;
pub mod crawler;
pub mod hymn;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for hymnal crawler operations
#[derive(Debug, Error)]
pub enum HymnalError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while pulling a hymn out of a detail page
///
/// These describe a page whose shape does not match what the hymnal site
/// normally serves. They are contained to the single hymn being extracted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Missing {element} on {url}")]
    MissingElement { url: String, element: &'static str },

    #[error("Malformed hymn slug in {url}")]
    MalformedSlug { url: String },
}

/// Result type alias for hymnal crawler operations
pub type Result<T> = std::result::Result<T, HymnalError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::CrawlOutcome;
pub use hymn::HymnRecord;
pub use output::CrawlStats;
pub use crate::url::build_page_url;
