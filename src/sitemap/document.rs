//! Sitemap document parsing
//!
//! Handles both standard sitemaps (`<urlset>` of `<url>`) and sitemap indices
//! (`<sitemapindex>` of `<sitemap>`). A single document may contain both
//! kinds of entry; each `<loc>` is classified by its parent element.

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Raw `<loc>` spans, for documents that are not well-formed XML
static LOC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<loc>(.*?)</loc>").expect("loc pattern is valid")
});

/// Errors from XML sitemap parsing
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Document ended inside <{0}>")]
    Truncated(String),
}

/// One parsed sitemap document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapNode {
    /// `<sitemap><loc>` values: further sitemaps to traverse
    pub children: Vec<String>,

    /// `<url><loc>` values: page URLs
    pub pages: Vec<String>,
}

/// Which entry a `<loc>` belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Sitemap,
    Url,
}

/// Parses a sitemap or sitemap index
///
/// # Errors
///
/// Returns an error if the XML is malformed (mismatched tags, bad escapes)
/// or ends before its root element is closed.
///
/// # Examples
///
/// ```
/// use route_sounder::sitemap::parse_document;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/page1</loc></url>
/// </urlset>"#;
///
/// let node = parse_document(xml).unwrap();
/// assert_eq!(node.pages, vec!["https://example.com/page1"]);
/// assert!(node.children.is_empty());
/// ```
pub fn parse_document(xml: &str) -> Result<SitemapNode, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut node = SitemapNode::default();
    let mut open: Vec<String> = Vec::new();
    let mut entry: Option<Entry> = None;
    let mut loc: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "sitemap" => entry = Some(Entry::Sitemap),
                    "url" => entry = Some(Entry::Url),
                    "loc" if entry.is_some() => loc = Some(String::new()),
                    _ => {}
                }
                open.push(name);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                open.pop();
                match name.as_str() {
                    "loc" => {
                        if let (Some(kind), Some(value)) = (entry, loc.take()) {
                            let value = value.trim().to_string();
                            if !value.is_empty() {
                                match kind {
                                    Entry::Sitemap => node.children.push(value),
                                    Entry::Url => node.pages.push(value),
                                }
                            }
                        }
                    }
                    "sitemap" | "url" => entry = None,
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(value) = loc.as_mut() {
                    let text = e.unescape().map_err(|e| SitemapError::Xml(e.to_string()))?;
                    value.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(value) = loc.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SitemapError::Xml(e.to_string())),
            _ => {}
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(SitemapError::Truncated(unclosed));
    }

    Ok(node)
}

/// Scrapes `<loc>` values out of text that failed to parse as XML
///
/// Every match is treated as a page URL.
pub fn scrape_locs(body: &str) -> Vec<String> {
    LOC_PATTERN
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect()
}
