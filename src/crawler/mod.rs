//! Crawler module for fetching and mining a site
//!
//! This module contains the network-facing half of discovery:
//! - HTTP transport and fetching with retry logic
//! - HTML parsing and link extraction
//! - Bounded-depth link crawling
//! - Route harvesting from pages and scripts
//! - The seed worklist
//! - Overall discovery coordination

mod coordinator;
mod fetcher;
mod harvest;
mod link_crawler;
mod parser;
mod transport;
mod worklist;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{
    run_discovery, Coordinator, DiscoveryCounters, DiscoveryReport, EndpointSource, DEFAULT_SEEDS,
    SORTED_USERS_SEED,
};
pub use fetcher::{FetchResult, Fetcher, Page};
pub use harvest::PageHarvester;
pub use link_crawler::{CrawlOutcome, CrawledPage, LinkCrawler};
pub use parser::{extract_links_simple, parse_html, script_sources, ParsedPage};
pub use transport::{build_http_client, RawResponse, ReqwestTransport, Transport, TransportError};
pub use worklist::{SeedWorklist, WorklistOutcome};
