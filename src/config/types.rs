use serde::Deserialize;
use std::num::NonZeroU32;

/// Main configuration structure for Book-Sieve
///
/// Every section has defaults, so an empty (or missing) file yields a
/// working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Search endpoint; `page` and `q` are appended as query parameters
    #[serde(rename = "search-endpoint")]
    pub search_endpoint: String,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-pages-open")]
    pub max_concurrent_pages_open: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            search_endpoint: "https://www.goodreads.com/search".to_string(),
            max_concurrent_pages_open: 8,
            request_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// CSS selectors locating the parts of a search result
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One match per result row
    pub row: String,

    /// Title element inside a row
    pub title: String,

    /// Author-name containers inside a row
    pub author: String,

    /// Element holding the rating / count / year / editions text
    pub details: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            row: "tr".to_string(),
            title: ".bookTitle".to_string(),
            author: ".authorName__container".to_string(),
            details: ".uitext.greyText.smallText".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON results file (overwritten on every run)
    #[serde(rename = "results-path")]
    pub results_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: "results.json".to_string(),
        }
    }
}

/// What to search for and how far to go; fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Free-text search query
    pub query: String,

    /// Number of result pages to fetch, starting at page 1
    pub page_count: NonZeroU32,
}

impl RunConfig {
    pub fn new(query: impl Into<String>, page_count: NonZeroU32) -> Self {
        Self {
            query: query.into(),
            page_count,
        }
    }
}
