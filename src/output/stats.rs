//! Run statistics
//!
//! Reconciles how many rows were found with how many books were kept, and
//! how many pages were fetched with how many failed.

use crate::crawler::RowCounts;

/// Counters for one finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Pages issued
    pub pages_requested: usize,

    /// Pages fetched and traversed
    pub pages_fetched: usize,

    /// Pages whose fetch failed after being issued
    pub pages_failed: usize,

    /// Result rows found across all fetched pages
    pub rows_seen: usize,

    /// Rows that became books
    pub books_retained: usize,

    /// Rows discarded because a required field was missing or malformed
    pub rows_rejected: usize,
}

impl RunStatistics {
    pub fn new(pages_requested: usize, pages_fetched: usize, pages_failed: usize, rows: RowCounts) -> Self {
        Self {
            pages_requested,
            pages_fetched,
            pages_failed,
            rows_seen: rows.seen,
            books_retained: rows.retained,
            rows_rejected: rows.rejected,
        }
    }

    /// Share of found rows that were kept, as a percentage
    pub fn retention_rate(&self) -> f64 {
        if self.rows_seen == 0 {
            return 0.0;
        }
        (self.books_retained as f64 / self.rows_seen as f64) * 100.0
    }

    /// Logs the statistics at info level
    pub fn log(&self) {
        tracing::info!(
            "Pages: {} requested, {} fetched, {} failed",
            self.pages_requested,
            self.pages_fetched,
            self.pages_failed
        );
        tracing::info!(
            "Rows: {} found, {} parsed, {} discarded ({:.2}% kept)",
            self.rows_seen,
            self.books_retained,
            self.rows_rejected,
            self.retention_rate()
        );
        tracing::info!("Parsed book count: {}", self.books_retained);
    }
}
