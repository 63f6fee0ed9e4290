//! Output module for persisting hymns and reporting on crawls
//!
//! This module handles:
//! - Writing the hymn collection as a pretty-printed JSON array
//! - Reading a previously written collection back
//! - Recording run statistics and summarizing collections

mod json;
pub mod stats;

pub use json::{load_hymns_json, to_pretty_json, write_hymns_json};
pub use stats::{print_summary, summarize, CrawlStats, HymnalSummary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
