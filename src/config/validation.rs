use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;

    if config.categories.is_empty() {
        return Err(ConfigError::Validation(
            "categories must name at least one category".to_string(),
        ));
    }

    for category in &config.categories {
        validate_category(category)?;
    }

    if config.first_page < 1 {
        return Err(ConfigError::Validation(format!(
            "first_page must be >= 1, got {}",
            config.first_page
        )));
    }

    if config.last_page < config.first_page {
        return Err(ConfigError::Validation(format!(
            "last_page ({}) must not be lower than first_page ({})",
            config.last_page, config.first_page
        )));
    }

    Ok(())
}

/// Validates the listing root that page URLs are built from
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            base_url
        )));
    }

    // Category names are appended verbatim
    if !base_url.ends_with('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must end with '/'",
            base_url
        )));
    }

    Ok(())
}

/// Validates a single category identifier
fn validate_category(category: &str) -> Result<(), ConfigError> {
    if category.trim().is_empty() {
        return Err(ConfigError::Validation(
            "category names cannot be empty".to_string(),
        ));
    }

    if category.contains('/') {
        return Err(ConfigError::Validation(format!(
            "category '{}' cannot contain '/'",
            category
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.hymns_path.is_empty() {
        return Err(ConfigError::Validation(
            "hymns_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
