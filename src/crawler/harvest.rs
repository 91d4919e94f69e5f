//! Route harvesting from fetched pages
//!
//! A page contributes the routes in its own markup plus those in every
//! same-origin script it loads. Scripts are shared between pages of a site,
//! so each one is fetched and scanned at most once per harvester.

use crate::crawler::parser::script_sources;
use crate::crawler::Fetcher;
use crate::extract::{extract_from_html, extract_from_script};
use crate::progress::DiscoveryEvent;
use crate::state::VisitedSet;
use crate::url::same_origin;
use std::collections::BTreeSet;
use url::Url;

/// Runs the heuristic extractors over pages and their scripts
pub struct PageHarvester<'a> {
    fetcher: &'a Fetcher,
    scripts_seen: VisitedSet,
}

impl<'a> PageHarvester<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self {
            fetcher,
            scripts_seen: VisitedSet::new(),
        }
    }

    /// Number of distinct scripts requested so far
    pub fn scripts_scanned(&self) -> usize {
        self.scripts_seen.len()
    }

    /// Collects candidate routes from the page at `page_url`
    ///
    /// Routes from markup are resolved against the page URL; those leaving
    /// the page's origin are dropped. Every returned route is root-relative.
    pub async fn harvest(&mut self, page_url: &Url, html: &str) -> BTreeSet<String> {
        let mut routes: BTreeSet<String> = extract_from_html(html)
            .iter()
            .filter_map(|raw| resolve_route(page_url, raw))
            .collect();

        let scripts = script_sources(html, page_url);
        if !scripts.is_empty() {
            self.fetcher.sink().report(&DiscoveryEvent::ScriptsFound {
                page: page_url.to_string(),
                count: scripts.len(),
            });
        }

        for script in scripts {
            if !self.scripts_seen.insert(script.to_string()) {
                continue;
            }

            if let Some(page) = self.fetcher.fetch(&script).await.into_success() {
                let found = extract_from_script(&page.body);
                tracing::debug!("{} routes in {}", found.len(), script);
                routes.extend(found);
            }
        }

        routes
    }
}

/// Resolves a markup route against its page, keeping only same-origin paths
fn resolve_route(page_url: &Url, raw: &str) -> Option<String> {
    let resolved = page_url.join(raw).ok()?;
    same_origin(&resolved, page_url).then(|| resolved.path().to_string())
}
