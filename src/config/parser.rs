use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::num::NonZeroU32;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Loads the configuration file if one is given, otherwise the built-in defaults
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Parses the requested number of result pages
///
/// Surrounding whitespace is ignored. Anything that is not a positive
/// integer is rejected.
pub fn parse_page_count(input: &str) -> Result<NonZeroU32, ConfigError> {
    let trimmed = input.trim();
    trimmed
        .parse::<NonZeroU32>()
        .map_err(|e| ConfigError::InvalidPageCount(format!("'{}': {}", trimmed, e)))
}
