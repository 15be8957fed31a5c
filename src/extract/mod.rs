//! Extraction of book metadata from search-result rows
//!
//! This module contains:
//! - The `BookRecord` produced for every successfully parsed row
//! - Regex-based field extraction from a row's detail text
//! - Author extraction from a row's author-name elements
//! - The row parser combining both

mod authors;
mod fields;
mod row;

pub use authors::extract_authors;
pub use fields::{BookFields, FieldPatterns};
pub use row::{RowError, RowParser, RowSelectors};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One parsed search result
///
/// A record only exists if every required field was extracted; rows with a
/// missing or malformed rating, rating count or edition count are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    pub average_rating: f32,

    pub number_of_ratings: u64,

    /// `None` when the result does not print a publication year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<i32>,

    pub editions: u32,
}

/// Failure to extract a required field from a row's detail text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("malformed average rating: {0}")]
    MalformedRating(String),

    #[error("malformed rating count: {0}")]
    MalformedRatingCount(String),

    #[error("malformed publication year: {0}")]
    MalformedYear(String),

    #[error("malformed edition count: {0}")]
    MalformedEditionCount(String),
}

impl ExtractionError {
    /// Name of the field that failed, for log output
    pub fn field(&self) -> &'static str {
        match self {
            ExtractionError::MalformedRating(_) => "average_rating",
            ExtractionError::MalformedRatingCount(_) => "number_of_ratings",
            ExtractionError::MalformedYear(_) => "published",
            ExtractionError::MalformedEditionCount(_) => "editions",
        }
    }
}
