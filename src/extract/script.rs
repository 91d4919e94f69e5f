//! Route extraction from script bodies

use super::patterns::{clean_script_candidate, SCRIPT_PATTERNS};
use std::collections::BTreeSet;

/// Extracts route-shaped strings from JavaScript source
///
/// Runs every pattern of the route table over `text`. Each capture is
/// cleaned: absolute URLs, fragments, `javascript:` and `mailto:` values are
/// dropped, query and fragment are stripped, and a leading `/` is added when
/// missing.
///
/// The heuristic is lossy in both directions: it misses routes assembled at
/// runtime and reports string literals that merely look like routes.
///
/// # Example
///
/// ```
/// use route_sounder::extract::extract_from_script;
///
/// let routes = extract_from_script("fetch('/api/users?x=1').then(r => r.json())");
/// assert!(routes.contains("/api/users"));
/// ```
pub fn extract_from_script(text: &str) -> BTreeSet<String> {
    let mut routes = BTreeSet::new();

    for pattern in SCRIPT_PATTERNS.iter() {
        for raw in pattern.captures(text) {
            if let Some(route) = clean_script_candidate(raw) {
                tracing::trace!("{} pattern matched {}", pattern.name, route);
                routes.insert(route);
            }
        }
    }

    routes
}
