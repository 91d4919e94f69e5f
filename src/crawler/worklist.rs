//! Seed-driven endpoint worklist
//!
//! Starting from the seed endpoints and whatever the crawl already turned
//! up, endpoints are fetched one at a time in FIFO order. Each fetched page is
//! harvested and newly seen routes join the back of the queue. The scan ends
//! when the queue drains or the page budget is spent.

use crate::crawler::harvest::PageHarvester;
use crate::crawler::Fetcher;
use crate::progress::DiscoveryEvent;
use crate::robots::RobotsTxt;
use crate::state::{Pacer, VisitedSet};
use crate::url::same_origin;
use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;
use url::Url;

/// What the worklist learned
#[derive(Debug, Clone, Default)]
pub struct WorklistOutcome {
    /// Seeds that answered with a success status
    pub reachable_seeds: BTreeSet<String>,

    /// Routes first seen by this worklist
    pub extracted: BTreeSet<String>,

    /// Pages fetched
    pub pages_scanned: usize,

    /// True if the page budget stopped the scan early
    pub truncated: bool,
}

/// FIFO scan over endpoints of one origin
pub struct SeedWorklist<'a> {
    fetcher: &'a Fetcher,
    base_url: &'a Url,
    pacer: Pacer,
    max_pages: usize,
    scanned: VisitedSet,
    robots: Option<(&'a RobotsTxt, String)>,
}

impl<'a> SeedWorklist<'a> {
    /// Creates a worklist for the origin of `base_url`
    ///
    /// `politeness_delay` is the minimum gap between two fetches;
    /// `max_pages` caps the number of fetches.
    pub fn new(
        fetcher: &'a Fetcher,
        base_url: &'a Url,
        politeness_delay: Duration,
        max_pages: usize,
    ) -> Self {
        Self {
            fetcher,
            base_url,
            pacer: Pacer::new(politeness_delay),
            max_pages,
            scanned: VisitedSet::new(),
            robots: None,
        }
    }

    /// Skips endpoints that `robots` disallows for `user_agent`
    pub fn with_robots(mut self, robots: &'a RobotsTxt, user_agent: impl Into<String>) -> Self {
        self.robots = Some((robots, user_agent.into()));
        self
    }

    /// Marks an endpoint as already fetched elsewhere so it is not fetched again
    pub fn mark_scanned(&mut self, endpoint: impl Into<String>) {
        self.scanned.insert(endpoint.into());
    }

    /// Scans `seeds` followed by `known` endpoints
    ///
    /// Routes in `known` are treated as already discovered: they are scanned
    /// but not reported again in [`WorklistOutcome::extracted`].
    pub async fn run<I>(
        &mut self,
        seeds: &[String],
        known: I,
        harvester: &mut PageHarvester<'_>,
    ) -> WorklistOutcome
    where
        I: IntoIterator<Item = String>,
    {
        let sink = self.fetcher.sink();
        let mut outcome = WorklistOutcome::default();

        let mut seen: BTreeSet<String> = seeds.iter().cloned().collect();
        let mut queue: VecDeque<String> = seeds.iter().cloned().collect();
        for endpoint in known {
            if seen.insert(endpoint.clone()) {
                queue.push_back(endpoint);
            }
        }

        while let Some(endpoint) = queue.pop_front() {
            if !self.scanned.insert(endpoint.clone()) {
                continue;
            }

            let Ok(target) = self.base_url.join(&endpoint) else {
                continue;
            };
            if !same_origin(&target, self.base_url) {
                tracing::debug!("Skipping off-origin endpoint {}", endpoint);
                continue;
            }

            if let Some((robots, user_agent)) = &self.robots {
                if !robots.is_allowed(target.as_str(), user_agent) {
                    sink.report(&DiscoveryEvent::CrawlDisallowed {
                        url: target.to_string(),
                    });
                    continue;
                }
            }

            if outcome.pages_scanned >= self.max_pages {
                sink.report(&DiscoveryEvent::WorklistLimitReached {
                    limit: self.max_pages,
                    pending: queue.len() + 1,
                });
                outcome.truncated = true;
                break;
            }

            sink.report(&DiscoveryEvent::WorklistScan {
                endpoint: endpoint.clone(),
                remaining: queue.len(),
            });

            self.pacer.wait_turn().await;
            outcome.pages_scanned += 1;

            // Pages with an error status are scanned too
            let Some(page) = self.fetcher.fetch(&target).await.into_page() else {
                continue;
            };

            if page.is_success() && seeds.contains(&endpoint) {
                outcome.reachable_seeds.insert(endpoint.clone());
            }

            for route in harvester.harvest(&target, &page.body).await {
                if seen.insert(route.clone()) {
                    outcome.extracted.insert(route.clone());
                    queue.push_back(route);
                }
            }
        }

        outcome
    }
}
