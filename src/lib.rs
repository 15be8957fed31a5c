//! Book-Sieve: a search-results scraper for book catalog sites
//!
//! This crate fetches paginated search-result pages, extracts per-book
//! metadata from each result row, and writes the collected records as JSON.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod prompt;

use thiserror::Error;

/// Main error type for Book-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Can't read input: {0}")]
    Input(std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Error while building the request for {url}: {source}")]
    RequestBuild { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Page task failed to complete: {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
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

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Can't parse page count: {0}")]
    InvalidPageCount(String),
}

/// Result type alias for Book-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

// Re-export commonly used types
pub use config::{Config, RunConfig};
pub use crawler::{CrawlReport, PageDriver};
pub use extract::{BookRecord, ExtractionError};
