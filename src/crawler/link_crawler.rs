//! Bounded-depth, same-origin link crawler
//!
//! Breadth-first over an explicit [`Frontier`], so every URL is fetched at
//! the smallest depth it is reachable from the seed and cyclic link graphs
//! terminate.

use crate::crawler::parser::extract_links_simple;
use crate::crawler::Fetcher;
use crate::progress::DiscoveryEvent;
use crate::robots::RobotsTxt;
use crate::state::Frontier;
use crate::url::same_origin;
use std::collections::HashSet;
use url::Url;

/// A page the crawler fetched successfully
#[derive(Debug, Clone)]
pub struct CrawledPage {
    pub url: Url,
    pub depth: u32,
    pub body: String,
}

/// Everything one crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Same-origin link targets, in discovery order, without duplicates
    pub discovered: Vec<Url>,

    /// Pages that answered with a success status, in fetch order
    pub pages: Vec<CrawledPage>,
}

/// Crawls anchor links within the seed's origin
pub struct LinkCrawler<'a> {
    fetcher: &'a Fetcher,
    robots: Option<(&'a RobotsTxt, String)>,
}

impl<'a> LinkCrawler<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self {
            fetcher,
            robots: None,
        }
    }

    /// Keeps the crawler off URLs that `robots` disallows for `user_agent`
    pub fn with_robots(mut self, robots: &'a RobotsTxt, user_agent: impl Into<String>) -> Self {
        self.robots = Some((robots, user_agent.into()));
        self
    }

    fn is_allowed(&self, url: &Url) -> bool {
        match &self.robots {
            Some((robots, user_agent)) => robots.is_allowed(url.as_str(), user_agent),
            None => true,
        }
    }

    /// Crawls from `seed` down to `max_depth` link hops
    ///
    /// # Rules
    ///
    /// - A URL is fetched at most once per call (fragment ignored)
    /// - Pages that fail or answer with a non-2xx status contribute nothing
    /// - Only links sharing the seed's origin are recorded or followed
    /// - Links found at `max_depth` are recorded but not followed
    pub async fn crawl(&self, seed: &Url, max_depth: u32) -> CrawlOutcome {
        let sink = self.fetcher.sink();
        let mut outcome = CrawlOutcome::default();
        let mut recorded: HashSet<Url> = HashSet::new();
        let mut frontier = Frontier::with_seed(seed.clone());

        while let Some(entry) = frontier.pop() {
            if entry.depth > max_depth || !frontier.mark_visited(&entry.url) {
                continue;
            }

            if !self.is_allowed(&entry.url) {
                sink.report(&DiscoveryEvent::CrawlDisallowed {
                    url: entry.url.to_string(),
                });
                continue;
            }

            sink.report(&DiscoveryEvent::CrawlPage {
                url: entry.url.to_string(),
                depth: entry.depth,
                max_depth,
            });

            let Some(page) = self.fetcher.fetch(&entry.url).await.into_success() else {
                continue;
            };

            for mut link in extract_links_simple(&page.body, &entry.url) {
                if !same_origin(&link, seed) {
                    continue;
                }
                link.set_fragment(None);

                if recorded.insert(link.clone()) {
                    outcome.discovered.push(link.clone());
                }

                if entry.depth < max_depth && self.is_allowed(&link) {
                    frontier.push(link, entry.depth + 1);
                }
            }

            outcome.pages.push(CrawledPage {
                url: entry.url,
                depth: entry.depth,
                body: page.body,
            });
        }

        tracing::debug!(
            "Crawl of {} done: {} pages, {} links",
            seed,
            outcome.pages.len(),
            outcome.discovered.len()
        );

        outcome
    }
}
