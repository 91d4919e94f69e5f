//! Route extraction from HTML documents

use super::patterns::{strip_candidate, INLINE_ROUTE};
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// Attribute-bearing elements worth reading, as (selector, attribute)
const ROUTE_ATTRIBUTES: &[(&str, &str)] = &[
    ("a[href]", "href"),
    ("form[action]", "action"),
    ("[data-href]", "data-href"),
    ("[data-url]", "data-url"),
];

/// Extracts candidate routes from an HTML document
///
/// # Sources
///
/// - `<a href>`, `<form action>`, `data-href` and `data-url` attributes
/// - `path: "..."` declarations inside inline `<script>` blocks
///
/// Absolute URLs, fragments, `javascript:` and `mailto:` values are dropped;
/// query and fragment are stripped. Values are returned as written otherwise,
/// so relative paths still need resolving against the page URL.
///
/// # Example
///
/// ```
/// use route_sounder::extract::extract_from_html;
///
/// let html = r#"<a href="/dashboard?tab=1">x</a><script>const r = { path: "/settings" };</script>"#;
/// let routes = extract_from_html(html);
/// assert!(routes.contains("/dashboard"));
/// assert!(routes.contains("/settings"));
/// ```
pub fn extract_from_html(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let mut routes = BTreeSet::new();

    for (selector, attribute) in ROUTE_ATTRIBUTES {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };

        for element in document.select(&selector) {
            if let Some(route) = element.value().attr(attribute).and_then(strip_candidate) {
                routes.insert(route.to_string());
            }
        }
    }

    if let Ok(script_selector) = Selector::parse("script") {
        for element in document.select(&script_selector) {
            if element.value().attr("src").is_some() {
                continue;
            }

            let body = element.text().collect::<String>();
            for caps in INLINE_ROUTE.captures_iter(&body) {
                if let Some(route) = caps.get(1).and_then(|m| strip_candidate(m.as_str())) {
                    routes.insert(route.to_string());
                }
            }
        }
    }

    routes
}
