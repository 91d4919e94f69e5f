//! Progress reporting for discovery runs
//!
//! The engine never writes to a fixed stream. Every component reports typed
//! [`DiscoveryEvent`]s to a [`ProgressSink`]; the default [`TracingSink`]
//! forwards them to `tracing` at a level matching their severity.

use crate::state::DiscoveryPhase;
use std::fmt;

/// Something worth telling the operator about
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryEvent {
    /// Certificate validation was turned off for this run
    TlsVerificationDisabled,

    /// The orchestrator moved between phases
    PhaseChanged {
        from: DiscoveryPhase,
        to: DiscoveryPhase,
    },

    /// A transport failure that will be retried
    FetchRetry {
        url: String,
        attempt: u32,
        max_attempts: u32,
        error: String,
    },

    /// A URL stayed unreachable after every attempt
    FetchFailed { url: String, error: String },

    /// robots.txt was (or was not) retrieved
    RobotsChecked { url: String, found: bool },

    /// A conventional sitemap location is being tried
    SitemapProbe { url: String },

    /// A sitemap location was settled on
    SitemapFound { url: String },

    /// Neither robots.txt nor the conventional paths yielded a sitemap
    SitemapNotFound,

    /// One sitemap document was parsed
    SitemapParsed {
        url: String,
        pages: usize,
        children: usize,
    },

    /// XML parsing failed and `<loc>` spans were scraped instead
    SitemapFallback {
        url: String,
        error: String,
        recovered: usize,
    },

    /// A page is being fetched by the link crawler
    CrawlPage {
        url: String,
        depth: u32,
        max_depth: u32,
    },

    /// A robots.txt rule kept the crawler off a URL
    CrawlDisallowed { url: String },

    /// Same-origin scripts referenced by a page
    ScriptsFound { page: String, count: usize },

    /// The seed worklist is fetching an endpoint
    WorklistScan { endpoint: String, remaining: usize },

    /// The seed worklist stopped at its page budget
    WorklistLimitReached { limit: usize, pending: usize },

    /// The run finished
    Finished { endpoints: usize },
}

impl fmt::Display for DiscoveryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TlsVerificationDisabled => {
                write!(f, "TLS certificate verification disabled")
            }
            Self::PhaseChanged { from, to } => write!(f, "Phase {} -> {}", from, to),
            Self::FetchRetry {
                url,
                attempt,
                max_attempts,
                error,
            } => write!(f, "Retry {}/{} for {}: {}", attempt, max_attempts, url, error),
            Self::FetchFailed { url, error } => write!(f, "Failed to fetch {}: {}", url, error),
            Self::RobotsChecked { url, found: true } => write!(f, "Found robots.txt at {}", url),
            Self::RobotsChecked { url, found: false } => {
                write!(f, "No robots.txt found or unable to access {}", url)
            }
            Self::SitemapProbe { url } => write!(f, "Trying {}", url),
            Self::SitemapFound { url } => write!(f, "Found sitemap at {}", url),
            Self::SitemapNotFound => write!(f, "No sitemap found in common locations"),
            Self::SitemapParsed {
                url,
                pages,
                children,
            } => write!(
                f,
                "Parsed sitemap {}: {} URLs, {} nested sitemaps",
                url, pages, children
            ),
            Self::SitemapFallback {
                url,
                error,
                recovered,
            } => write!(
                f,
                "Error parsing sitemap {} ({}); recovered {} URLs by pattern",
                url, error, recovered
            ),
            Self::CrawlPage {
                url,
                depth,
                max_depth,
            } => write!(f, "Crawling page: {} (depth {}/{})", url, depth, max_depth),
            Self::CrawlDisallowed { url } => write!(f, "Skipping {} (disallowed by robots.txt)", url),
            Self::ScriptsFound { page, count } => {
                write!(f, "Found {} JavaScript files on {}", count, page)
            }
            Self::WorklistScan {
                endpoint,
                remaining,
            } => write!(f, "Scanning endpoint: {} ({} queued)", endpoint, remaining),
            Self::WorklistLimitReached { limit, pending } => write!(
                f,
                "Worklist page limit of {} reached with {} endpoints unscanned",
                limit, pending
            ),
            Self::Finished { endpoints } => write!(f, "Discovered {} endpoints", endpoints),
        }
    }
}

/// Receiver for discovery progress
///
/// Implementations must be cheap; they are called inline on the fetch path.
pub trait ProgressSink: Send + Sync {
    /// Handles one event
    fn report(&self, event: &DiscoveryEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn report(&self, event: &DiscoveryEvent) {
        match event {
            DiscoveryEvent::TlsVerificationDisabled
            | DiscoveryEvent::FetchFailed { .. }
            | DiscoveryEvent::SitemapFallback { .. }
            | DiscoveryEvent::WorklistLimitReached { .. } => tracing::warn!("{}", event),
            DiscoveryEvent::FetchRetry { .. }
            | DiscoveryEvent::PhaseChanged { .. }
            | DiscoveryEvent::SitemapProbe { .. }
            | DiscoveryEvent::CrawlDisallowed { .. } => tracing::debug!("{}", event),
            _ => tracing::info!("{}", event),
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&self, _event: &DiscoveryEvent) {}
}
