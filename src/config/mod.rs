//! Configuration module for Route-Sounder
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file is the common case.
//!
//! # Example
//!
//! ```no_run
//! use route_sounder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sounder.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.discovery.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DiscoveryConfig, FetcherConfig, OutputConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::{validate, validate_seed};
