//! Robots.txt parser implementation
//!
//! `Sitemap:` directives are scanned line by line; allow/deny rules are
//! delegated to the robotstxt crate.

use robotstxt::DefaultMatcher;
use url::Url;

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct RobotsTxt {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
}

impl RobotsTxt {
    /// Creates a new RobotsTxt from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Returns every `Sitemap:` value, in file order
    ///
    /// The directive name is matched case-insensitively. Values are returned
    /// as written, without resolution.
    pub fn sitemaps(&self) -> Vec<String> {
        self.content
            .lines()
            .filter_map(|line| {
                let line = line.trim_start();
                let (name, value) = line.split_once(':')?;
                if !name.trim_end().eq_ignore_ascii_case("sitemap") {
                    return None;
                }
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            })
            .collect()
    }

    /// Returns `Sitemap:` values resolved against `base`
    ///
    /// Values that cannot be parsed or resolved are skipped.
    pub fn sitemap_urls(&self, base: &Url) -> Vec<Url> {
        self.sitemaps()
            .iter()
            .filter_map(|value| base.join(value).ok())
            .collect()
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The user agent string
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}
