//! Route pattern table
//!
//! Every pattern has exactly one capture group holding the candidate route.
//! The table is applied in order and all matches of every pattern are kept,
//! so overlapping patterns may report the same route twice; callers collect
//! into a set.

use regex::Regex;
use std::sync::LazyLock;

/// A named route pattern
pub struct RoutePattern {
    /// Short label used in debug logs
    pub name: &'static str,
    pub regex: Regex,
}

impl RoutePattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("route pattern is valid"),
        }
    }

    /// Iterates over the captured route of every match in `text`
    pub fn captures<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Patterns applied to script bodies, in order
pub static SCRIPT_PATTERNS: LazyLock<Vec<RoutePattern>> = LazyLock::new(|| {
    vec![
        RoutePattern::new("path", r#"\bpath:\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("pathname", r#"\bpathname:\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("href", r#"\bhref:\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("as", r#"\bas:\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("url", r#"\burl:\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("route", r#"\broute:\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("goto", r#"\bgoto\(\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("router.push", r#"\brouter\.push\(\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("Link", r#"\bLink\s+href=['"]([^'"]+)['"]"#),
        RoutePattern::new("navigate", r#"\bnavigate\(\s*['"]([^'"]+)['"]"#),
        RoutePattern::new("fetch", r#"\bfetch\(\s*['"`]([^'"`]+)['"`]"#),
        RoutePattern::new("api", r"(api/[A-Za-z0-9_\-/]+)"),
    ]
});

/// Router-style `path:` declarations inside inline `<script>` blocks
pub static INLINE_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"path:\s*['"]([^'"]+)['"]"#).expect("inline route pattern is valid")
});

/// Prefixes that mark a value as absolute, in-page or non-navigational
const DISCARD_PREFIXES: &[&str] = &["http", "#", "javascript:", "mailto:"];

/// Drops non-route values and strips the query and fragment
///
/// Returns `None` for absolute URLs, fragment-only values, `javascript:` and
/// `mailto:` links, and values that are empty once stripped.
pub fn strip_candidate(raw: &str) -> Option<&str> {
    let value = raw.trim();
    let lower = value.to_ascii_lowercase();

    if DISCARD_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return None;
    }

    let end = value.find(&['?', '#'][..]).unwrap_or(value.len());
    let value = &value[..end];

    (!value.is_empty()).then_some(value)
}

/// Cleans a route captured from script text
///
/// Applies [`strip_candidate`], rejects values containing whitespace (prose
/// caught by the looser patterns), and makes the result root-relative.
pub fn clean_script_candidate(raw: &str) -> Option<String> {
    let value = strip_candidate(raw)?;

    if value.chars().any(char::is_whitespace) {
        return None;
    }

    if value.starts_with('/') {
        Some(value.to_string())
    } else {
        Some(format!("/{}", value))
    }
}
