//! Frontier and visited-set bookkeeping for traversals
//!
//! A [`Frontier`] is created per crawl invocation and dropped when it
//! returns. Entries are popped in FIFO order, so a URL reachable at several
//! depths is always processed at the smallest one.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// URLs (or sitemap URLs) already processed in one traversal
pub type VisitedSet = HashSet<String>;

/// A URL awaiting a fetch, with its distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: Url,

    /// Number of link hops from the seed
    pub depth: u32,
}

/// FIFO work queue paired with the visited set that guards it
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: VisitedSet,
}

impl Frontier {
    /// Creates a frontier holding only `seed` at depth 0
    pub fn with_seed(seed: Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed, 0);
        frontier
    }

    /// Queues `url` at `depth`
    ///
    /// Already-visited URLs are not queued again. Returns true if queued.
    pub fn push(&mut self, url: Url, depth: u32) -> bool {
        if self.visited.contains(&visit_key(&url)) {
            return false;
        }
        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Removes the oldest entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Records `url` as processed; returns false if it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(visit_key(url))
    }

}

/// Key used for visited checks: the URL without its fragment
fn visit_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.into()
}
