//! Route-Sounder: a best-effort endpoint mapper for web applications
//!
//! This crate discovers the URL paths of a web application from its sitemap,
//! from a bounded-depth link crawl, and from route-shaped strings found in its
//! HTML and script bundles. It never executes client-side code.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod progress;
pub mod robots;
pub mod sitemap;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Route-Sounder operations
#[derive(Debug, Error)]
pub enum SounderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::DiscoveryPhase,
        to: state::DiscoveryPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed path: {0}")]
    InvalidSeed(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Route-Sounder operations
pub type Result<T> = std::result::Result<T, SounderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, DiscoveryReport, EndpointSource};
pub use progress::{DiscoveryEvent, ProgressSink, TracingSink};
pub use state::DiscoveryPhase;
pub use crate::url::{normalize_endpoint, parse_base_url};
