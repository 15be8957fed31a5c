//! Regex-based extraction of the numeric fields of a result row
//!
//! The detail text of a result looks like
//! `4.23 avg rating — 1,234 ratings — published 1998 — 45 editions`,
//! possibly with line breaks between the parts.

use crate::extract::ExtractionError;
use regex::Regex;

/// Numeric fields extracted from a row's detail text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookFields {
    pub average_rating: f32,
    pub number_of_ratings: u64,
    pub published: Option<i32>,
    pub editions: u32,
}

/// Precompiled patterns for the detail text
///
/// Built once and shared read-only between workers.
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    average_rating: Regex,
    number_of_ratings: Regex,
    published: Regex,
    editions: Regex,
}

impl FieldPatterns {
    pub fn new() -> Self {
        Self {
            average_rating: compile(r"([\d.]+) avg rating"),
            number_of_ratings: compile(r"(?:^|\s)([\d,]+) rating"),
            // The year is sometimes on the next line
            published: compile(r"published\s*(\d+)"),
            editions: compile(r"([\d,]+) edition"),
        }
    }

    /// Extracts all four fields, stopping at the first one that fails
    ///
    /// A missing publication year is not an error and yields `None`.
    pub fn extract_fields(&self, text: &str) -> Result<BookFields, ExtractionError> {
        Ok(BookFields {
            average_rating: self.average_rating(text)?,
            number_of_ratings: self.number_of_ratings(text)?,
            published: self.published(text)?,
            editions: self.editions(text)?,
        })
    }

    fn average_rating(&self, text: &str) -> Result<f32, ExtractionError> {
        let raw = first_capture(&self.average_rating, text)
            .ok_or_else(|| ExtractionError::MalformedRating("no 'avg rating' in text".into()))?;
        raw.parse::<f32>()
            .map_err(|e| ExtractionError::MalformedRating(format!("'{}': {}", raw, e)))
    }

    fn number_of_ratings(&self, text: &str) -> Result<u64, ExtractionError> {
        let raw = first_capture(&self.number_of_ratings, text)
            .ok_or_else(|| ExtractionError::MalformedRatingCount("no 'rating' count in text".into()))?;
        raw.replace(',', "")
            .parse::<u64>()
            .map_err(|e| ExtractionError::MalformedRatingCount(format!("'{}': {}", raw, e)))
    }

    fn published(&self, text: &str) -> Result<Option<i32>, ExtractionError> {
        match first_capture(&self.published, text) {
            Some(raw) => raw
                .parse::<i32>()
                .map(Some)
                .map_err(|e| ExtractionError::MalformedYear(format!("'{}': {}", raw, e))),
            None => Ok(None),
        }
    }

    fn editions(&self, text: &str) -> Result<u32, ExtractionError> {
        let raw = first_capture(&self.editions, text)
            .ok_or_else(|| ExtractionError::MalformedEditionCount("no 'edition' count in text".into()))?;
        raw.replace(',', "")
            .parse::<u32>()
            .map_err(|e| ExtractionError::MalformedEditionCount(format!("'{}': {}", raw, e)))
    }
}

impl Default for FieldPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Patterns are literals; a failure here is a programming error caught by tests
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid field pattern {}: {}", pattern, e))
}

fn first_capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
