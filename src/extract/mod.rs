//! Heuristic route extraction
//!
//! Pulls route-shaped strings out of HTML markup and script bundles without
//! executing anything. Results are candidates only; the normalizer resolves
//! them against the base URL and drops anything off-origin.

mod html;
mod patterns;
mod script;

pub use html::extract_from_html;
pub use patterns::{clean_script_candidate, strip_candidate, RoutePattern, SCRIPT_PATTERNS};
pub use script::extract_from_script;
