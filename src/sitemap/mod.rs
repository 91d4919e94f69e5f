//! Sitemap discovery and traversal
//!
//! The resolver finds a sitemap (robots.txt first, then conventional paths)
//! and flattens it, following sitemap indices to their leaves.
//!
//! Traversal is an explicit FIFO loop over an owned queue, guarded by a
//! [`VisitedSet`], so a self-referencing or cyclic index terminates and deep
//! nesting never grows the call stack.

mod document;

pub use document::{parse_document, scrape_locs, SitemapError, SitemapNode};

use crate::crawler::{FetchResult, Fetcher};
use crate::progress::DiscoveryEvent;
use crate::robots::{fetch_robots, robots_url, RobotsTxt};
use crate::state::VisitedSet;
use std::collections::VecDeque;
use url::Url;

/// Conventional sitemap locations, probed in order
pub const SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap.php",
    "/sitemap.txt",
    "/sitemap-index.xml",
    "/wp-sitemap.xml",
    "/sitemapindex.xml",
];

/// Locates and parses sitemaps through a [`Fetcher`]
pub struct SitemapResolver<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> SitemapResolver<'a> {
    /// Creates a resolver that fetches through `fetcher`
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Finds the sitemap of the site at `base_url`
    ///
    /// Fetches robots.txt itself; use [`discover_with`](Self::discover_with)
    /// when it has already been retrieved.
    pub async fn discover_sitemap(&self, base_url: &Url) -> Option<Url> {
        let robots = fetch_robots(self.fetcher, base_url).await;
        self.discover_with(base_url, robots.as_ref()).await
    }

    /// Finds the sitemap using an already-fetched robots.txt
    ///
    /// # Lookup Order
    ///
    /// 1. The first resolvable `Sitemap:` directive in robots.txt, relative
    ///    values taken from the robots.txt location
    /// 2. The first of [`SITEMAP_PATHS`] answering with a success status and
    ///    an XML content type or `<?xml` body prefix
    pub async fn discover_with(&self, base_url: &Url, robots: Option<&RobotsTxt>) -> Option<Url> {
        let sink = self.fetcher.sink();

        let directive = robots.zip(robots_url(base_url)).and_then(|(robots, location)| {
            robots.sitemap_urls(&location).into_iter().next()
        });
        if let Some(url) = directive {
            sink.report(&DiscoveryEvent::SitemapFound {
                url: url.to_string(),
            });
            return Some(url);
        }

        for path in SITEMAP_PATHS {
            let Ok(candidate) = base_url.join(path) else {
                continue;
            };

            sink.report(&DiscoveryEvent::SitemapProbe {
                url: candidate.to_string(),
            });

            let found = self
                .fetcher
                .fetch(&candidate)
                .await
                .into_success()
                .is_some_and(|page| page.looks_like_xml());

            if found {
                sink.report(&DiscoveryEvent::SitemapFound {
                    url: candidate.to_string(),
                });
                return Some(candidate);
            }
        }

        sink.report(&DiscoveryEvent::SitemapNotFound);
        None
    }

    /// Flattens the sitemap at `url` into page URLs
    ///
    /// Sitemaps already in `visited` are skipped without error. Fetch
    /// failures are reported and skipped. A document that is not well-formed
    /// XML falls back to scraping its `<loc>` spans.
    pub async fn parse_sitemap(&self, url: &Url, visited: &mut VisitedSet) -> Vec<String> {
        let sink = self.fetcher.sink();
        let mut urls = Vec::new();
        let mut queue = VecDeque::from([url.clone()]);

        while let Some(sitemap_url) = queue.pop_front() {
            if !visited.insert(sitemap_url.to_string()) {
                tracing::debug!("Skipping already visited sitemap {}", sitemap_url);
                continue;
            }

            let page = match self.fetcher.fetch(&sitemap_url).await {
                FetchResult::Success(page) if page.is_success() => page,
                FetchResult::Success(page) => {
                    sink.report(&DiscoveryEvent::FetchFailed {
                        url: sitemap_url.to_string(),
                        error: format!("HTTP {}", page.status_code),
                    });
                    continue;
                }
                // Already reported by the fetcher
                FetchResult::Unreachable { .. } => continue,
            };

            match parse_document(&page.body) {
                Ok(node) => {
                    sink.report(&DiscoveryEvent::SitemapParsed {
                        url: sitemap_url.to_string(),
                        pages: node.pages.len(),
                        children: node.children.len(),
                    });

                    for child in &node.children {
                        match sitemap_url.join(child) {
                            Ok(child_url) => queue.push_back(child_url),
                            Err(e) => tracing::debug!("Bad nested sitemap {:?}: {}", child, e),
                        }
                    }
                    urls.extend(node.pages);
                }
                Err(e) => {
                    let recovered = scrape_locs(&page.body);
                    sink.report(&DiscoveryEvent::SitemapFallback {
                        url: sitemap_url.to_string(),
                        error: e.to_string(),
                        recovered: recovered.len(),
                    });
                    urls.extend(recovered);
                }
            }
        }

        urls
    }

    /// Flattens the sitemap at `url` with a fresh visited set
    pub async fn collect(&self, url: &Url) -> Vec<String> {
        let mut visited = VisitedSet::new();
        self.parse_sitemap(url, &mut visited).await
    }
}
