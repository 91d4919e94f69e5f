//! HTTP fetcher implementation
//!
//! This module turns a single-shot [`Transport`] into the engine's fetch
//! primitive:
//! - Bounded retries on transport failures
//! - A fixed pause between attempts
//! - A terminal `Unreachable` result instead of an error once attempts run out

use crate::config::FetcherConfig;
use crate::crawler::transport::{RawResponse, Transport};
use crate::progress::{DiscoveryEvent, ProgressSink};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A fetched document
#[derive(Debug, Clone)]
pub struct Page {
    /// The URL that was requested
    pub url: Url,
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value (empty when absent)
    pub content_type: String,
    /// Page body content
    pub body: String,
}

impl Page {
    fn from_raw(url: &Url, raw: RawResponse) -> Self {
        Self {
            url: url.clone(),
            final_url: raw.final_url,
            status_code: raw.status_code,
            content_type: raw.content_type.unwrap_or_default(),
            body: raw.body,
        }
    }

    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns true if the content type or the body prefix says XML
    pub fn looks_like_xml(&self) -> bool {
        self.content_type.to_ascii_lowercase().contains("xml")
            || self.body.trim_start().starts_with("<?xml")
    }
}

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// The server answered (with any status code)
    Success(Page),

    /// Every attempt failed at the transport level
    Unreachable {
        /// The URL that could not be fetched
        url: String,
        /// Description of the last failure
        error: String,
        /// Number of attempts made
        attempts: u32,
    },
}

impl FetchResult {
    /// Returns the page if the server answered at all
    pub fn into_page(self) -> Option<Page> {
        match self {
            Self::Success(page) => Some(page),
            Self::Unreachable { .. } => None,
        }
    }

    /// Returns the page only if it answered with a 2xx status
    pub fn into_success(self) -> Option<Page> {
        self.into_page().filter(Page::is_success)
    }
}

/// Fetches URLs with retry logic
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | Any HTTP status | Immediate → Success (callers inspect the status) |
/// | Timeout | Retry after the configured delay |
/// | Connection / TLS error | Retry after the configured delay |
/// | Body read error | Retry after the configured delay |
/// | Last attempt failed | → Unreachable |
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    max_attempts: u32,
    retry_delay: Duration,
    sink: Arc<dyn ProgressSink>,
}

impl Fetcher {
    /// Creates a fetcher using the configured retry policy
    pub fn new(
        transport: Arc<dyn Transport>,
        config: &FetcherConfig,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self::with_retry_policy(
            transport,
            config.max_attempts,
            Duration::from_millis(config.retry_delay_ms),
            sink,
        )
    }

    /// Creates a fetcher with an explicit retry policy
    pub fn with_retry_policy(
        transport: Arc<dyn Transport>,
        max_attempts: u32,
        retry_delay: Duration,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            transport,
            max_attempts: max_attempts.max(1),
            retry_delay,
            sink,
        }
    }

    /// The sink this fetcher reports to
    pub fn sink(&self) -> &Arc<dyn ProgressSink> {
        &self.sink
    }

    /// Fetches a URL, retrying transport failures
    ///
    /// Never returns an error: a URL that stays unreachable is reported to
    /// the sink and returned as [`FetchResult::Unreachable`].
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.transport.get(url).await {
                Ok(raw) => {
                    tracing::trace!("GET {} -> {}", url, raw.status_code);
                    return FetchResult::Success(Page::from_raw(url, raw));
                }
                Err(e) if attempt >= self.max_attempts => {
                    let error = e.to_string();
                    self.sink.report(&DiscoveryEvent::FetchFailed {
                        url: url.to_string(),
                        error: error.clone(),
                    });
                    return FetchResult::Unreachable {
                        url: url.to_string(),
                        error,
                        attempts: attempt,
                    };
                }
                Err(e) => {
                    self.sink.report(&DiscoveryEvent::FetchRetry {
                        url: url.to_string(),
                        attempt,
                        max_attempts: self.max_attempts,
                        error: e.to_string(),
                    });
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}
