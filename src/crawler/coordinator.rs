//! Discovery coordinator - top-level orchestration
//!
//! Drives one discovery run through its phases:
//!
//! ```text
//! Seeded -> SitemapAttempted -> SitemapSource -> Merging -> Done
//!                            \-> CrawlSource  -/
//! ```
//!
//! A sitemap that yields URLs is trusted as the complete picture. Otherwise
//! the site is crawled, every crawled page and script is harvested for
//! routes, and the seed worklist scans what was found. Either way the
//! candidates are normalized into one sorted endpoint set.

use crate::config::{validate, Config};
use crate::crawler::harvest::PageHarvester;
use crate::crawler::link_crawler::LinkCrawler;
use crate::crawler::transport::{ReqwestTransport, Transport};
use crate::crawler::worklist::SeedWorklist;
use crate::crawler::Fetcher;
use crate::progress::{DiscoveryEvent, ProgressSink};
use crate::robots::{fetch_robots, RobotsTxt};
use crate::sitemap::SitemapResolver;
use crate::state::DiscoveryPhase;
use crate::url::{normalize_all, parse_base_url};
use crate::SounderError;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Endpoints probed on every crawled site
pub const DEFAULT_SEEDS: &[&str] = &["/", "/users", "/audit", "/api", "/login", "/dashboard"];

/// A sorted user listing some admin panels only render with this query
pub const SORTED_USERS_SEED: &str = "/users?sort=nameAlphabetical";

/// Where the reported endpoints came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    /// A sitemap listed them
    Sitemap,

    /// Crawling, harvesting and the seed worklist found them
    Crawl,
}

impl fmt::Display for EndpointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sitemap => write!(f, "sitemap"),
            Self::Crawl => write!(f, "crawl"),
        }
    }
}

/// Work done during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryCounters {
    pub sitemap_urls: usize,
    pub pages_crawled: usize,
    pub links_discovered: usize,
    pub scripts_scanned: usize,
    pub worklist_pages: usize,
    pub candidates: usize,

    /// The worklist page budget ran out before its queue drained
    pub worklist_truncated: bool,
}

/// Result of a discovery run
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// The normalized base URL the run was scoped to
    pub base_url: Url,

    /// Sorted, deduplicated endpoint paths
    pub endpoints: BTreeSet<String>,

    pub source: EndpointSource,
    pub counters: DiscoveryCounters,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DiscoveryReport {
    /// Wall-clock time the run took
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Main discovery orchestrator
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
    phase: DiscoveryPhase,
}

impl Coordinator {
    /// Creates a coordinator backed by a reqwest transport
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SounderError)` - Invalid configuration or HTTP client setup failure
    pub fn new(config: Config, sink: Arc<dyn ProgressSink>) -> Result<Self, SounderError> {
        validate(&config)?;

        let transport = ReqwestTransport::new(&config.fetcher, config.discovery.verify_tls)?;
        if !config.discovery.verify_tls {
            sink.report(&DiscoveryEvent::TlsVerificationDisabled);
        }

        Ok(Self::with_transport(config, Arc::new(transport), sink))
    }

    /// Creates a coordinator over any transport
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        let fetcher = Fetcher::new(transport, &config.fetcher, sink);

        Self {
            config,
            fetcher,
            phase: DiscoveryPhase::Seeded,
        }
    }

    /// Current phase
    pub fn phase(&self) -> DiscoveryPhase {
        self.phase
    }

    /// Seed endpoints for the worklist: defaults, the sorted listing, then configured seeds
    pub fn seeds(&self) -> Vec<String> {
        let mut seeds: Vec<String> = DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect();
        seeds.push(SORTED_USERS_SEED.to_string());

        for seed in &self.config.discovery.seeds {
            if !seeds.contains(seed) {
                seeds.push(seed.clone());
            }
        }

        seeds
    }

    fn transition(&mut self, to: DiscoveryPhase) -> Result<(), SounderError> {
        let from = self.phase;
        if !from.can_transition_to(to) {
            return Err(SounderError::InvalidTransition { from, to });
        }

        self.phase = to;
        self.fetcher
            .sink()
            .report(&DiscoveryEvent::PhaseChanged { from, to });
        Ok(())
    }

    /// Runs discovery against `base_url`
    ///
    /// Network trouble never fails a run: unreachable URLs are reported to
    /// the sink and skipped, and whatever was found is returned.
    pub async fn run(&mut self, base_url: &Url) -> Result<DiscoveryReport, SounderError> {
        let started_at = Utc::now();
        self.phase = DiscoveryPhase::Seeded;
        let mut counters = DiscoveryCounters::default();

        tracing::info!("Starting discovery for {}", base_url);

        self.transition(DiscoveryPhase::SitemapAttempted)?;
        let robots = fetch_robots(&self.fetcher, base_url).await;
        let sitemap_urls = self.sitemap_candidates(base_url, robots.as_ref()).await;
        counters.sitemap_urls = sitemap_urls.len();

        let (source, candidates) = if sitemap_urls.is_empty() {
            self.transition(DiscoveryPhase::CrawlSource)?;
            let candidates = self
                .crawl_candidates(base_url, robots.as_ref(), &mut counters)
                .await;
            (EndpointSource::Crawl, candidates)
        } else {
            self.transition(DiscoveryPhase::SitemapSource)?;
            (EndpointSource::Sitemap, sitemap_urls)
        };
        counters.candidates = candidates.len();

        self.transition(DiscoveryPhase::Merging)?;
        let endpoints = normalize_all(candidates.iter().map(String::as_str), base_url);

        self.transition(DiscoveryPhase::Done)?;
        self.fetcher.sink().report(&DiscoveryEvent::Finished {
            endpoints: endpoints.len(),
        });

        Ok(DiscoveryReport {
            base_url: base_url.clone(),
            endpoints,
            source,
            counters,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Every page URL the site's sitemap lists, or nothing
    async fn sitemap_candidates(&self, base_url: &Url, robots: Option<&RobotsTxt>) -> Vec<String> {
        let resolver = SitemapResolver::new(&self.fetcher);

        match resolver.discover_with(base_url, robots).await {
            Some(sitemap_url) => resolver.collect(&sitemap_url).await,
            None => Vec::new(),
        }
    }

    /// Crawl, harvest, then scan the seed worklist
    async fn crawl_candidates(
        &self,
        base_url: &Url,
        robots: Option<&RobotsTxt>,
        counters: &mut DiscoveryCounters,
    ) -> Vec<String> {
        let discovery = &self.config.discovery;

        let user_agent = self.config.fetcher.user_agent.as_str();
        let obeyed = robots.filter(|_| discovery.respect_robots);

        let mut crawler = LinkCrawler::new(&self.fetcher);
        if let Some(robots) = obeyed {
            crawler = crawler.with_robots(robots, user_agent);
        }

        let outcome = crawler.crawl(base_url, discovery.max_depth).await;
        counters.pages_crawled = outcome.pages.len();
        counters.links_discovered = outcome.discovered.len();

        let mut candidates: Vec<String> =
            outcome.discovered.iter().map(Url::to_string).collect();

        let mut harvester = PageHarvester::new(&self.fetcher);
        let mut extracted = BTreeSet::new();
        let mut worklist = SeedWorklist::new(
            &self.fetcher,
            base_url,
            Duration::from_millis(discovery.politeness_delay_ms),
            discovery.max_worklist_pages,
        );
        if let Some(robots) = obeyed {
            worklist = worklist.with_robots(robots, user_agent);
        }

        for page in &outcome.pages {
            candidates.push(page.url.to_string());
            extracted.extend(harvester.harvest(&page.url, &page.body).await);
            worklist.mark_scanned(endpoint_key(&page.url));
        }

        let seeds = self.seeds();
        let scanned = worklist
            .run(&seeds, extracted.iter().cloned(), &mut harvester)
            .await;

        counters.worklist_pages = scanned.pages_scanned;
        counters.worklist_truncated = scanned.truncated;
        counters.scripts_scanned = harvester.scripts_scanned();

        candidates.extend(extracted);
        candidates.extend(scanned.reachable_seeds);
        candidates.extend(scanned.extracted);
        candidates
    }
}

/// The worklist key of a fetched URL: its path plus any query
fn endpoint_key(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Runs discovery for `target` with a reqwest transport
///
/// `target` may omit its scheme; `https://` is assumed.
///
/// # Example
///
/// ```no_run
/// use route_sounder::crawler::run_discovery;
/// use route_sounder::{Config, TracingSink};
/// use std::sync::Arc;
///
/// # async fn demo() -> route_sounder::Result<()> {
/// let report = run_discovery(Config::default(), "example.com", Arc::new(TracingSink)).await?;
/// for endpoint in &report.endpoints {
///     println!("{}", endpoint);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_discovery(
    config: Config,
    target: &str,
    sink: Arc<dyn ProgressSink>,
) -> Result<DiscoveryReport, SounderError> {
    let base_url = parse_base_url(target)?;
    let mut coordinator = Coordinator::new(config, sink)?;
    coordinator.run(&base_url).await
}
