//! Output module for delivering discovery results
//!
//! This module handles:
//! - Writing the endpoint set to a file or the console
//! - Formatting the run summary

mod console;
mod file;
mod summary;
mod traits;

pub use console::ConsoleOutput;
pub use file::FileOutput;
pub use summary::format_summary;
pub use traits::{OutputError, OutputHandler, OutputResult};

use std::path::Path;

/// Picks the output handler: a file when `path` is given, the console otherwise
pub fn output_for(path: Option<&Path>) -> Box<dyn OutputHandler> {
    match path {
        Some(path) => Box::new(FileOutput::new(path)),
        None => Box::new(ConsoleOutput::stdout()),
    }
}
