//! Configuration module for the hymnal crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a crawl can also run from `Config::default()`.
//!
//! # Example
//!
//! ```no_run
//! use hymnal_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hymnal.toml")).unwrap();
//! println!("Crawling {} categories", config.crawler.categories.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, DEFAULT_BASE_URL, DEFAULT_CATEGORIES};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
