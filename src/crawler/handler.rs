//! Per-row callback contract and the shared book collection
//!
//! Page workers run concurrently, so `RowHandler::handle_row` takes `&self`
//! and implementations synchronize their own state.

use crate::extract::{BookRecord, RowParser};
use scraper::{ElementRef, Html, Selector};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Callback invoked once for every row matching the row selector
///
/// No ordering is guaranteed between rows of different pages.
pub trait RowHandler: Send + Sync {
    fn handle_row(&self, row: ElementRef<'_>);
}

/// Parses a page and hands every matching row to `handler`
///
/// Returns the number of rows visited.
pub fn traverse_rows(html: &str, row_selector: &Selector, handler: &dyn RowHandler) -> usize {
    let document = Html::parse_document(html);
    let mut rows = 0;
    for row in document.select(row_selector) {
        handler.handle_row(row);
        rows += 1;
    }
    rows
}

/// Row counters at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    /// Every row handed to the collector
    pub seen: usize,
    /// Rows that became a `BookRecord`
    pub retained: usize,
    /// Rows discarded because a required field failed
    pub rejected: usize,
}

/// Collects the books of every page into one shared vector
pub struct BookCollector {
    parser: Arc<RowParser>,
    books: Mutex<Vec<BookRecord>>,
    rows_seen: AtomicUsize,
    books_retained: AtomicUsize,
    rows_rejected: AtomicUsize,
}

impl BookCollector {
    pub fn new(parser: Arc<RowParser>) -> Self {
        Self {
            parser,
            books: Mutex::new(Vec::new()),
            rows_seen: AtomicUsize::new(0),
            books_retained: AtomicUsize::new(0),
            rows_rejected: AtomicUsize::new(0),
        }
    }

    /// Runs every row of one page through this collector
    ///
    /// Returns the number of rows found on the page.
    pub fn collect_page(&self, html: &str) -> usize {
        traverse_rows(html, self.parser.row_selector(), self)
    }

    pub fn counts(&self) -> RowCounts {
        RowCounts {
            seen: self.rows_seen.load(Ordering::SeqCst),
            retained: self.books_retained.load(Ordering::SeqCst),
            rejected: self.rows_rejected.load(Ordering::SeqCst),
        }
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.lock_books().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes the collected records out, leaving the collection empty
    pub fn take_books(&self) -> Vec<BookRecord> {
        std::mem::take(&mut *self.lock_books())
    }

    fn lock_books(&self) -> std::sync::MutexGuard<'_, Vec<BookRecord>> {
        // A panicking worker cannot leave a half-pushed record behind
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RowHandler for BookCollector {
    fn handle_row(&self, row: ElementRef<'_>) {
        self.rows_seen.fetch_add(1, Ordering::SeqCst);

        match self.parser.parse_row(row) {
            Ok(book) => {
                tracing::debug!("Found book: {}", book.title);
                self.lock_books().push(book);
                self.books_retained.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                tracing::warn!(
                    field = e.source.field(),
                    title = %e.title,
                    "Discarding row: {}",
                    e.source
                );
                self.rows_rejected.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}
