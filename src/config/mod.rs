//! Configuration module for Book-Sieve
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and parsing the per-run search parameters.
//!
//! # Example
//!
//! ```no_run
//! use book_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("book-sieve.toml")).unwrap();
//! println!("Searching via: {}", config.crawler.search_endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, RunConfig, SelectorConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_page_count};
pub use validation::validate;
