//! Page driver - issues every search page and waits for all of them
//!
//! The driver:
//! - Builds the URL of every requested result page
//! - Issues all page fetches up front, bounded by a semaphore
//! - Feeds each fetched page through the shared `BookCollector`
//! - Waits for every page to settle before handing back the books

use crate::config::{Config, RunConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::handler::BookCollector;
use crate::extract::{BookRecord, RowParser};
use crate::output::RunStatistics;
use crate::{Result, SieveError};
use reqwest::{Client, Request};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Parsed books, in no particular order
    pub books: Vec<BookRecord>,

    pub stats: RunStatistics,
}

/// How a single page ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOutcome {
    Fetched,
    Failed,
}

/// Builds the URL of one search-result page
///
/// Produces `<endpoint>?page=<page>&q=<query>` with the query form-encoded.
///
/// # Example
///
/// ```
/// use book_sieve::crawler::search_url;
/// use url::Url;
///
/// let endpoint = Url::parse("https://www.goodreads.com/search").unwrap();
/// let url = search_url(&endpoint, 2, "fantasy");
/// assert_eq!(url.as_str(), "https://www.goodreads.com/search?page=2&q=fantasy");
/// ```
pub fn search_url(endpoint: &Url, page: u32, query: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("q", query);
    url
}

/// Fetches search-result pages concurrently and collects their books
pub struct PageDriver {
    client: Client,
    endpoint: Url,
    max_concurrent_pages: usize,
    parser: Arc<RowParser>,
}

impl PageDriver {
    /// Creates a driver from a validated configuration
    ///
    /// Fails if the search endpoint is not a valid URL, a selector does not
    /// parse, or the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&config.crawler.search_endpoint)?;
        let parser = RowParser::from_config(&config.selectors)?;
        let client = build_http_client(&config.user_agent, &config.crawler)?;

        Ok(Self {
            client,
            endpoint,
            max_concurrent_pages: config.crawler.max_concurrent_pages_open.max(1) as usize,
            parser: Arc::new(parser),
        })
    }

    /// Runs one search: pages `1..=page_count`, then joins them all
    ///
    /// # Errors
    ///
    /// Failing to issue a request aborts the whole run, including pages
    /// already in flight. Pages that fail after being issued are logged and
    /// counted, and do not stop the run.
    pub async fn run(&self, run: &RunConfig) -> Result<CrawlReport> {
        tracing::info!("Detected inputs: {} {}", run.query, run.page_count);

        let collector = Arc::new(BookCollector::new(Arc::clone(&self.parser)));
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_pages));
        let mut pages = JoinSet::new();

        let page_count = run.page_count.get();
        for page in 1..=page_count {
            // Dropping `pages` on early return aborts fetches already spawned
            let request = self.build_request(page, &run.query)?;
            tracing::info!("Going to parse: {}", request.url());

            pages.spawn(process_page(
                self.client.clone(),
                request,
                page,
                Arc::clone(&semaphore),
                Arc::clone(&collector),
            ));
        }

        let mut pages_fetched = 0;
        let mut pages_failed = 0;
        while let Some(joined) = pages.join_next().await {
            match joined? {
                PageOutcome::Fetched => pages_fetched += 1,
                PageOutcome::Failed => pages_failed += 1,
            }
        }

        let stats = RunStatistics::new(
            page_count as usize,
            pages_fetched,
            pages_failed,
            collector.counts(),
        );
        let books = collector.take_books();

        Ok(CrawlReport { books, stats })
    }

    fn build_request(&self, page: u32, query: &str) -> Result<Request> {
        let url = search_url(&self.endpoint, page, query);
        self.client
            .get(url.clone())
            .build()
            .map_err(|source| SieveError::RequestBuild {
                url: url.to_string(),
                source,
            })
    }
}

/// Fetches one page and runs its rows through the collector
async fn process_page(
    client: Client,
    request: Request,
    page: u32,
    semaphore: Arc<Semaphore>,
    collector: Arc<BookCollector>,
) -> PageOutcome {
    // `run` never closes the semaphore; a closed one fails the page
    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => {
            tracing::error!("Page {} was not fetched: {}", page, e);
            return PageOutcome::Failed;
        }
    };

    let url = request.url().to_string();
    let body = match fetch_page(&client, request).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            if final_url != url {
                tracing::info!("Page {} was redirected from {} to {}", page, url, final_url);
            }
            tracing::debug!("Fetched {} (HTTP {})", final_url, status_code);
            body
        }
        FetchResult::HttpError { status_code } => {
            tracing::error!("Error while doing the request to {}: HTTP {}", url, status_code);
            return PageOutcome::Failed;
        }
        FetchResult::NetworkError { error } => {
            tracing::error!("Error while doing the request to {}: {}", url, error);
            return PageOutcome::Failed;
        }
    };

    // HTML parsing is CPU-bound and the parsed tree is not Send
    let parsed = tokio::task::spawn_blocking(move || collector.collect_page(&body)).await;
    match parsed {
        Ok(rows) => {
            tracing::debug!("Found {} result rows on page {}", rows, page);
            PageOutcome::Fetched
        }
        Err(e) => {
            tracing::error!("Failed to parse page {}: {}", page, e);
            PageOutcome::Failed
        }
    }
}
