//! Crawler module for search-page fetching and row collection
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of result pages
//! - The per-row callback contract and the shared book collection
//! - Issuing every page concurrently and joining them

mod driver;
mod fetcher;
mod handler;

pub use driver::{search_url, CrawlReport, PageDriver};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use handler::{traverse_rows, BookCollector, RowCounts, RowHandler};

use crate::config::{Config, RunConfig};
use crate::Result;

/// Runs a complete search crawl
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP client and row parser
/// 2. Issue one request per result page
/// 3. Extract books from every row of every fetched page
/// 4. Return the books together with run statistics
///
/// # Example
///
/// ```no_run
/// use book_sieve::config::{Config, RunConfig};
/// use book_sieve::crawler::crawl;
/// use std::num::NonZeroU32;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let run = RunConfig::new("fantasy", NonZeroU32::new(2).unwrap());
/// let report = crawl(&Config::default(), &run).await?;
/// println!("{} books", report.books.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, run: &RunConfig) -> Result<CrawlReport> {
    PageDriver::new(config)?.run(run).await
}
