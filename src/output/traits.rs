//! Output handler trait and error types

use std::collections::BTreeSet;
use thiserror::Error;

/// Errors from writing results
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a finished endpoint set
///
/// Endpoints arrive sorted and deduplicated; handlers write them in the order
/// given.
pub trait OutputHandler {
    /// Writes the complete endpoint set
    fn write_endpoints(&mut self, endpoints: &BTreeSet<String>) -> OutputResult<()>;

    /// Short human-readable description of where the output went
    fn describe(&self) -> String;
}
