use crate::config::types::{Config, DiscoveryConfig, FetcherConfig};
use crate::ConfigError;

/// Deepest link crawl the configuration accepts
const MAX_CRAWL_DEPTH: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_discovery_config(&config.discovery)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_path(config.output.path.as_deref())?;
    Ok(())
}

/// Validates discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.max_depth > MAX_CRAWL_DEPTH {
        return Err(ConfigError::Validation(format!(
            "max-depth must be at most {}, got {}",
            MAX_CRAWL_DEPTH, config.max_depth
        )));
    }

    if config.max_worklist_pages < 1 {
        return Err(ConfigError::Validation(
            "max-worklist-pages must be >= 1".to_string(),
        ));
    }

    for seed in &config.seeds {
        validate_seed(seed)?;
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_path(path: Option<&str>) -> Result<(), ConfigError> {
    if let Some(path) = path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output path cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates a seed path
///
/// Seeds are resolved against the base URL, so they must be origin-relative
/// paths rather than absolute URLs.
pub fn validate_seed(seed: &str) -> Result<(), ConfigError> {
    if !seed.starts_with('/') {
        return Err(ConfigError::InvalidSeed(format!(
            "'{}' must start with '/'",
            seed
        )));
    }

    if seed.starts_with("//") {
        return Err(ConfigError::InvalidSeed(format!(
            "'{}' is protocol-relative, not a path",
            seed
        )));
    }

    if seed.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidSeed(format!(
            "'{}' contains whitespace",
            seed
        )));
    }

    Ok(())
}
