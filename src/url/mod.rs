//! URL handling module for Route-Sounder
//!
//! This module provides base URL parsing, origin scoping, and the endpoint
//! normalizer that turns raw references into sorted path sets.

mod normalize;
mod origin;

// Re-export main functions
pub use normalize::{normalize_all, normalize_endpoint};
pub use origin::{is_http, parse_base_url, same_origin};
