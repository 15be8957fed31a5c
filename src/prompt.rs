//! Interactive prompts for the search parameters
//!
//! Reads from any `BufRead` and writes the question to any `Write`, so the
//! binary uses stdin/stdout and tests use in-memory buffers.

use crate::config::{parse_page_count, RunConfig};
use crate::{Result, SieveError};
use std::io::{self, BufRead, Write};
use std::num::NonZeroU32;

/// Default search query
pub const DEFAULT_QUERY: &str = "fantasy";

/// Default number of result pages
pub const DEFAULT_PAGE_COUNT: &str = "10";

/// Asks `question` and returns the trimmed answer, or `default` if it is empty
///
/// End of input before any answer is an error.
pub fn prompt_with_default<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    default: &str,
) -> io::Result<String> {
    write!(writer, "{} Default \"{}\": ", question, default)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        ));
    }

    let answer = line.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Builds the run parameters, prompting only for values not already given
pub fn prompt_run_config<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    query: Option<String>,
    page_count: Option<NonZeroU32>,
) -> Result<RunConfig> {
    let query = match query {
        Some(query) => query,
        None => prompt_with_default(reader, writer, "What should we search for?", DEFAULT_QUERY)
            .map_err(SieveError::Input)?,
    };

    let page_count = match page_count {
        Some(pages) => pages,
        None => {
            let answer = prompt_with_default(
                reader,
                writer,
                "How many pages should we crawl?",
                DEFAULT_PAGE_COUNT,
            )
            .map_err(SieveError::Input)?;
            parse_page_count(&answer)?
        }
    };

    Ok(RunConfig::new(query, page_count))
}
