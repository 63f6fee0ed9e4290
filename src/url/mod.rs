//! URL handling module for the hymnal crawler
//!
//! This module builds listing-page URLs for the category × page crawl space
//! and resolves hrefs found on listing pages.

mod resolve;

use crate::config::CrawlerConfig;

pub use resolve::resolve_link;

/// A (category, page) pair identifying one listing page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryPageAddress {
    /// Category identifier, e.g. "001-100"
    pub category: String,

    /// One-based page number within the category
    pub page: u32,
}

impl CategoryPageAddress {
    /// Builds the listing URL for this address below `base`
    pub fn to_url(&self, base: &str) -> String {
        build_page_url(base, &self.category, self.page)
    }
}

/// Builds the URL of a category listing page
///
/// The first page of a category lives at the category root; later pages
/// live under `page/<n>/`, mirroring the hymnal site's routing.
///
/// # Examples
///
/// ```
/// use hymnal_crawler::url::build_page_url;
///
/// let base = "https://example.com/Hymnal/category/";
/// assert_eq!(build_page_url(base, "001-100", 1), "https://example.com/Hymnal/category/001-100/");
/// assert_eq!(build_page_url(base, "001-100", 3), "https://example.com/Hymnal/category/001-100/page/3/");
/// ```
pub fn build_page_url(base: &str, category: &str, page: u32) -> String {
    if page <= 1 {
        format!("{}{}/", base, category)
    } else {
        format!("{}{}/page/{}/", base, category, page)
    }
}

/// Enumerates every listing page of the crawl, category-major
///
/// Pages run from `first_page` through `last_page` inclusive for each
/// category, in the configured category order.
pub fn page_addresses(config: &CrawlerConfig) -> Vec<CategoryPageAddress> {
    config
        .categories
        .iter()
        .flat_map(|category| {
            (config.first_page..=config.last_page).map(move |page| CategoryPageAddress {
                category: category.clone(),
                page,
            })
        })
        .collect()
}
