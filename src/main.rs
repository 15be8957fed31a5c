//! Book-Sieve main entry point
//!
//! This is the command-line interface for the Book-Sieve search scraper.

use anyhow::Context;
use book_sieve::config::{load_config_or_default, Config, RunConfig};
use book_sieve::crawler::PageDriver;
use book_sieve::output::{ConsoleSink, JsonFileSink, ResultSink};
use book_sieve::prompt::prompt_run_config;
use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Book-Sieve: scrape book search results into JSON
///
/// Fetches the requested number of search-result pages concurrently,
/// extracts title, authors, rating, rating count, publication year and
/// edition count from every result, and writes them as a JSON array.
/// The query and page count are asked for interactively unless given.
#[derive(Parser, Debug)]
#[command(name = "book-sieve")]
#[command(version)]
#[command(about = "Scrape book search results into JSON", long_about = None)]
struct Cli {
    /// Search query (prompted for if omitted)
    #[arg(long)]
    query: Option<String>,

    /// Number of result pages to fetch (prompted for if omitted)
    #[arg(long, value_name = "N")]
    pages: Option<NonZeroU32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Results file, overriding the configured path
    #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print results to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    if let Some(path) = &cli.config {
        tracing::info!("Configuration loaded from: {}", path.display());
    }

    // Prompts share stderr with the logs; stdout may be carrying the JSON
    let run = {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut writer = std::io::stderr();
        prompt_run_config(&mut reader, &mut writer, cli.query.clone(), cli.pages)
    };
    let run = match run {
        Ok(run) => run,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let sink: Box<dyn ResultSink> = if cli.stdout {
        Box::new(ConsoleSink)
    } else {
        let path = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.results_path));
        Box::new(JsonFileSink::new(path))
    };

    match handle_crawl(&config, &run, sink.as_ref()).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Crawl failed: {:#}", e);
            Err(e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr, like the prompts, so `--stdout` output stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("book_sieve=info,warn"),
            1 => EnvFilter::new("book_sieve=debug,info"),
            2 => EnvFilter::new("book_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the crawl, then hands the books to the sink
async fn handle_crawl(config: &Config, run: &RunConfig, sink: &dyn ResultSink) -> anyhow::Result<()> {
    let started = std::time::Instant::now();

    let driver = PageDriver::new(config).context("failed to set up the crawler")?;
    let report = driver.run(run).await?;

    sink.write(&report.books)
        .context("failed to write the results")?;

    report.stats.log();
    tracing::info!("Crawl completed in {:?}", started.elapsed());

    Ok(())
}
