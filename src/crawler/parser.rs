//! HTML parser for extracting links and script references
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow (from <a> tags)
//! - Same-origin script files worth scanning for routes

use crate::url::{is_http, same_origin};
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// All anchor links found on the page (absolute URLs)
    pub links: Vec<Url>,

    /// Script sources on the same origin as the page (absolute URLs)
    pub scripts: Vec<Url>,
}

/// Parses HTML content and extracts links and scripts
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
///
/// # Script Rules
///
/// `<script src="...">` is resolved against the page URL (protocol-relative
/// sources inherit the page scheme) and kept only when it shares the page
/// origin.
///
/// html5ever recovers from any malformed markup, so parsing never fails.
///
/// # Example
///
/// ```
/// use route_sounder::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><script src="/app.js"></script></head>
/// <body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// assert_eq!(parsed.scripts[0].as_str(), "https://example.com/app.js");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        links: extract_links(&document, base_url),
        scripts: extract_scripts(&document, base_url),
    }
}

/// Extracts all valid anchor links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Extracts same-origin script sources from the HTML document
fn extract_scripts(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut scripts = Vec::new();

    if let Ok(script_selector) = Selector::parse("script[src]") {
        for element in document.select(&script_selector) {
            let Some(src) = element.value().attr("src") else {
                continue;
            };

            let Some(absolute_url) = resolve_link(src, base_url) else {
                continue;
            };

            if same_origin(&absolute_url, base_url) && !scripts.contains(&absolute_url) {
                scripts.push(absolute_url);
            }
        }
    }

    scripts
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    // Same page anchors
    if href.starts_with('#') {
        return None;
    }

    base_url.join(href).ok().filter(is_http)
}

/// Convenience function for extracting just the links from HTML
pub fn extract_links_simple(html: &str, base_url: &Url) -> Vec<Url> {
    parse_html(html, base_url).links
}

/// Same-origin `<script src>` URLs of a page
pub fn script_sources(html: &str, page_url: &Url) -> Vec<Url> {
    extract_scripts(&Html::parse_document(html), page_url)
}
