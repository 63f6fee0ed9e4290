use serde::Deserialize;

/// Category buckets published by the hymnal site
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "001-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700",
];

/// Listing root of the hymnal site
pub const DEFAULT_BASE_URL: &str = "https://sdahymnals.com/Hymnal/category/";

/// Main configuration structure for the hymnal crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl space and concurrency configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Prefix that category names are appended to; must end with '/'
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Category identifiers to walk, in crawl order
    pub categories: Vec<String>,

    /// First listing page visited per category
    #[serde(rename = "first-page")]
    pub first_page: u32,

    /// Last listing page visited per category (inclusive)
    #[serde(rename = "last-page")]
    pub last_page: u32,

    /// Upper bound on in-flight hymn extractions; 0 leaves fan-out unbounded
    #[serde(rename = "max-concurrent-extractions")]
    pub max_concurrent_extractions: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            first_page: 1,
            last_page: 10,
            max_concurrent_extractions: 0,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON file the hymn collection is written to
    #[serde(rename = "hymns-path")]
    pub hymns_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            hymns_path: "hymns.json".to_string(),
        }
    }
}
