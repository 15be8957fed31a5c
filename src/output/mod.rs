//! Output module for emitting crawl results
//!
//! This module handles:
//! - Serializing the collected books as pretty-printed JSON
//! - Writing them to the results file or to the console
//! - Reporting run statistics

mod json;
pub mod stats;
mod traits;

pub use json::{format_records, ConsoleSink, JsonFileSink};
pub use stats::RunStatistics;
pub use traits::{OutputError, OutputResult, ResultSink};
