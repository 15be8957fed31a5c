//! Turns one search-result row into a `BookRecord`

use crate::config::SelectorConfig;
use crate::extract::authors::extract_authors;
use crate::extract::fields::FieldPatterns;
use crate::extract::{BookRecord, ExtractionError};
use crate::ConfigError;
use scraper::{ElementRef, Selector};
use thiserror::Error;

/// A row that could not be turned into a record
#[derive(Debug, Error)]
#[error("error while parsing {} for '{title}': {source}", .source.field())]
pub struct RowError {
    /// Title of the rejected row (may be empty)
    pub title: String,
    pub source: ExtractionError,
}

/// Compiled CSS selectors for the parts of a result row
#[derive(Debug, Clone)]
pub struct RowSelectors {
    pub row: Selector,
    pub title: Selector,
    pub author: Selector,
    pub details: Selector,
}

impl RowSelectors {
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            row: parse_selector(&config.row)?,
            title: parse_selector(&config.title)?,
            author: parse_selector(&config.author)?,
            details: parse_selector(&config.details)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {}", selector, e)))
}

/// Parses result rows with a fixed set of selectors and patterns
///
/// Shared read-only between all page workers.
#[derive(Debug, Clone)]
pub struct RowParser {
    selectors: RowSelectors,
    patterns: FieldPatterns,
}

impl RowParser {
    pub fn new(selectors: RowSelectors, patterns: FieldPatterns) -> Self {
        Self {
            selectors,
            patterns,
        }
    }

    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            RowSelectors::from_config(config)?,
            FieldPatterns::new(),
        ))
    }

    /// Selector matching one result row on a page
    pub fn row_selector(&self) -> &Selector {
        &self.selectors.row
    }

    /// Builds a record from a row, or explains why the row was rejected
    pub fn parse_row(&self, row: ElementRef<'_>) -> Result<BookRecord, RowError> {
        let title = first_text(row, &self.selectors.title);
        let authors = extract_authors(row, &self.selectors.author);
        let details = first_text(row, &self.selectors.details);

        let fields = match self.patterns.extract_fields(&details) {
            Ok(fields) => fields,
            Err(source) => return Err(RowError { title, source }),
        };

        Ok(BookRecord {
            title,
            authors,
            average_rating: fields.average_rating,
            number_of_ratings: fields.number_of_ratings,
            published: fields.published,
            editions: fields.editions,
        })
    }
}

/// Trimmed text of the first element matching `selector`, or an empty string
fn first_text(row: ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
