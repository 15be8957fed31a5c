//! JSON output sinks

use crate::extract::BookRecord;
use crate::output::traits::{OutputError, OutputResult, ResultSink};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pretty-prints records as a JSON array
pub fn format_records(records: &[BookRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the records to a fixed file, overwriting it on every call
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn write(&self, records: &[BookRecord]) -> OutputResult<()> {
        let json = format_records(records)?;

        std::fs::write(&self.path, json).map_err(|source| OutputError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        tracing::info!(
            "Wrote {} books. You can find the results at {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Writes the pretty JSON array followed by a newline, and nothing else
fn write_json<W: Write>(records: &[BookRecord], writer: &mut W) -> OutputResult<()> {
    let json = format_records(records)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}

/// Prints the records to stdout instead of a file
///
/// Stdout carries only the JSON; prompts and logs belong on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn write(&self, records: &[BookRecord]) -> OutputResult<()> {
        let stdout = std::io::stdout();
        write_json(records, &mut stdout.lock())?;

        tracing::info!("Printed {} books", records.len());
        Ok(())
    }
}
