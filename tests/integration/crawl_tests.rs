//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock search endpoints and test
//! the full fetch → extract → collect → write cycle end-to-end.

use book_sieve::config::{Config, RunConfig};
use book_sieve::crawler::PageDriver;
use book_sieve::output::{JsonFileSink, ResultSink};
use book_sieve::BookRecord;
use std::collections::BTreeSet;
use std::num::NonZeroU32;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, max_concurrent_pages_open: u32) -> Config {
    let mut config = Config::default();
    config.crawler.search_endpoint = format!("{}/search", server.uri());
    config.crawler.max_concurrent_pages_open = max_concurrent_pages_open;
    config.crawler.request_timeout_secs = 5;
    config
}

fn run_config(query: &str, pages: u32) -> RunConfig {
    RunConfig::new(query, NonZeroU32::new(pages).unwrap())
}

/// One result row in the markup the default selectors expect
fn book_row(title: &str, author: &str, details: &str) -> String {
    format!(
        r#"<tr itemscope itemtype="http://schema.org/Book">
            <td width="100%" valign="top">
                <a class="bookTitle" itemprop="url" href="/book/show/1">
                    <span itemprop="name" role="heading" aria-level="4">{}</span>
                </a>
                <br/>
                <span class="by">by</span>
                <span itemprop="author" itemscope="" itemtype="http://schema.org/Person">
                    <div class="authorName__container">
                        <a class="authorName" itemprop="url" href="/author/show/1">
                            <span itemprop="name">{}</span>
                        </a>
                    </div>
                </span>
                <br/>
                <div>
                    <span class="greyText smallText uitext">
                        {}
                    </span>
                </div>
            </td>
        </tr>"#,
        title, author, details
    )
}

fn results_page(rows: &[String]) -> String {
    format!(
        r#"<html><head><title>Search results</title></head><body>
            <table class="tableList">{}</table>
        </body></html>"#,
        rows.concat()
    )
}

async fn mount_page(server: &MockServer, page: u32, query: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", page.to_string().as_str()))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

fn titles(books: &[BookRecord]) -> BTreeSet<String> {
    books.iter().map(|b| b.title.clone()).collect()
}

#[tokio::test]
async fn test_two_pages_issue_exactly_two_requests() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        1,
        "fantasy",
        results_page(&[
            book_row(
                "The Way of Kings",
                "Brandon Sanderson",
                "4.66 avg rating — 512,003 ratings — published 2010 — 98 editions",
            ),
            book_row(
                "The Lies of Locke Lamora",
                "Scott Lynch",
                "4.30 avg rating — 310,221 ratings — published\n 2006 — 87 editions",
            ),
        ]),
    )
    .await;
    mount_page(
        &server,
        2,
        "fantasy",
        results_page(&[book_row(
            "Uprooted",
            "Naomi Novik",
            "4.07 avg rating — 322,110 ratings — published 2015 — 71 editions",
        )]),
    )
    .await;

    let config = create_test_config(&server, 8);
    let driver = PageDriver::new(&config).expect("Failed to create driver");
    let report = driver
        .run(&run_config("fantasy", 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.books.len(), 3);
    assert_eq!(report.stats.pages_requested, 2);
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.pages_failed, 0);
    assert_eq!(report.stats.books_retained, 3);

    let expected: BTreeSet<String> = ["The Way of Kings", "The Lies of Locke Lamora", "Uprooted"]
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(titles(&report.books), expected);

    let locke = report
        .books
        .iter()
        .find(|b| b.title == "The Lies of Locke Lamora")
        .unwrap();
    assert_eq!(locke.authors, vec!["Scott Lynch"]);
    assert_eq!(locke.number_of_ratings, 310_221);
    assert_eq!(locke.published, Some(2006));
    assert_eq!(locke.editions, 87);

    // Request counts are verified when `server` is dropped
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_failed_page_does_not_stop_run() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        1,
        "horror",
        results_page(&[book_row(
            "The Shining",
            "Stephen King",
            "4.27 avg rating — 1,698,112 ratings — published 1977 — 1,021 editions",
        )]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, 8);
    let report = PageDriver::new(&config)
        .unwrap()
        .run(&run_config("horror", 2))
        .await
        .expect("A failed page must not abort the run");

    assert_eq!(report.stats.pages_fetched, 1);
    assert_eq!(report.stats.pages_failed, 1);
    assert_eq!(report.books.len(), 1);
    assert_eq!(report.books[0].editions, 1021);
}

#[tokio::test]
async fn test_incomplete_rows_are_discarded_and_counted() {
    let server = MockServer::start().await;

    let body = results_page(&[
        book_row(
            "Piranesi",
            "Susanna Clarke",
            "4.23 avg rating — 1,234 ratings — published 2020 — 45 editions",
        ),
        // No average rating
        book_row("Unrated Manuscript", "Nobody", "0 ratings — 1 edition"),
        // No publication year is fine
        book_row(
            "Forthcoming Novel",
            "Somebody",
            "3.80 avg rating — 5 ratings — 2 editions",
        ),
    ]);
    mount_page(&server, 1, "clarke", body).await;

    let config = create_test_config(&server, 8);
    let report = PageDriver::new(&config)
        .unwrap()
        .run(&run_config("clarke", 1))
        .await
        .unwrap();

    assert_eq!(report.stats.rows_seen, 3);
    assert_eq!(report.stats.books_retained, 2);
    assert_eq!(report.stats.rows_rejected, 1);
    assert_eq!(report.books.len(), 2);

    let forthcoming = report
        .books
        .iter()
        .find(|b| b.title == "Forthcoming Novel")
        .unwrap();
    assert_eq!(forthcoming.published, None);
    assert!(!titles(&report.books).contains("Unrated Manuscript"));
}

#[tokio::test]
async fn test_query_is_url_encoded() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        1,
        "the left hand of darkness",
        results_page(&[book_row(
            "The Left Hand of Darkness",
            "Ursula K. Le Guin",
            "4.09 avg rating — 142,000 ratings — published 1969 — 301 editions",
        )]),
    )
    .await;

    let config = create_test_config(&server, 8);
    let report = PageDriver::new(&config)
        .unwrap()
        .run(&run_config("the left hand of darkness", 1))
        .await
        .unwrap();

    assert_eq!(report.books.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("page=1&q=the+left+hand+of+darkness")
    );
}

#[tokio::test]
async fn test_many_pages_with_single_worker() {
    let server = MockServer::start().await;

    let pages = 6;
    for page in 1..=pages {
        mount_page(
            &server,
            page,
            "epic",
            results_page(&[book_row(
                &format!("Volume {}", page),
                "Series Author",
                "4.00 avg rating — 100 ratings — published 2001 — 3 editions",
            )]),
        )
        .await;
    }

    let config = create_test_config(&server, 1);
    let report = PageDriver::new(&config)
        .unwrap()
        .run(&run_config("epic", pages))
        .await
        .unwrap();

    let expected: BTreeSet<String> = (1..=pages).map(|p| format!("Volume {}", p)).collect();
    assert_eq!(titles(&report.books), expected);
    assert_eq!(report.stats.pages_fetched, pages as usize);
}

#[tokio::test]
async fn test_crawl_then_write_results_file() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        1,
        "fantasy",
        results_page(&[book_row(
            "Assassin's Apprentice",
            "Robin Hobb",
            "4.17 avg rating — 201,548 ratings — published 1995 — 163 editions",
        )]),
    )
    .await;

    let dir = tempfile::TempDir::new().unwrap();
    let results_path = dir.path().join("results.json");

    let config = create_test_config(&server, 8);
    let report = PageDriver::new(&config)
        .unwrap()
        .run(&run_config("fantasy", 1))
        .await
        .unwrap();

    let sink = JsonFileSink::new(&results_path);
    sink.write(&report.books).unwrap();
    let first = std::fs::read_to_string(&results_path).unwrap();

    sink.write(&report.books).unwrap();
    let second = std::fs::read_to_string(&results_path).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    let books = value.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Assassin's Apprentice");
    assert_eq!(books[0]["authors"][0], "Robin Hobb");
    assert_eq!(books[0]["number_of_ratings"], 201_548);
    assert_eq!(books[0]["published"], 1995);
    assert_eq!(books[0]["editions"], 163);
}
