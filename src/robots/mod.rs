//! Robots.txt handling module
//!
//! robots.txt serves two purposes here: it is the first place the sitemap
//! resolver looks for a `Sitemap:` directive, and, when the operator opts in,
//! its rules keep the link crawler off disallowed paths.

mod parser;

pub use parser::RobotsTxt;

use crate::crawler::Fetcher;
use crate::progress::DiscoveryEvent;
use url::Url;

/// The robots.txt location for the origin of `base_url`
pub fn robots_url(base_url: &Url) -> Option<Url> {
    base_url.join("/robots.txt").ok()
}

/// Fetches robots.txt from the origin of `base_url`
///
/// # Returns
///
/// * `Some(RobotsTxt)` - robots.txt answered with a success status
/// * `None` - Missing, unreachable, or answered with an error status
pub async fn fetch_robots(fetcher: &Fetcher, base_url: &Url) -> Option<RobotsTxt> {
    let robots_url = robots_url(base_url)?;

    let page = fetcher.fetch(&robots_url).await.into_success();

    fetcher.sink().report(&DiscoveryEvent::RobotsChecked {
        url: robots_url.to_string(),
        found: page.is_some(),
    });

    page.map(|page| RobotsTxt::from_content(&page.body))
}
