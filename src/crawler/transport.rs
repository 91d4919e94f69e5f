//! HTTP transport behind the fetcher
//!
//! The discovery engine only needs "GET this URL, give me the response or a
//! failure". [`Transport`] is that capability; [`ReqwestTransport`] is the
//! production implementation.

use crate::config::FetcherConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// A response as delivered by the transport, before any interpretation
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Decoded body text
    pub body: String,
}

/// Transport-level failures; these are the ones worth retrying
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            Self::Body(e.to_string())
        } else {
            Self::Other(e.to_string())
        }
    }
}

/// A single-shot HTTP GET capability
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one GET request with no retries
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;
}

/// Transport backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the transport from fetcher settings
    ///
    /// When `verify_tls` is false the client accepts any certificate.
    pub fn new(config: &FetcherConfig, verify_tls: bool) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, verify_tls)?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url.clone()).send().await?;

        let final_url = response.url().to_string();
        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await?;

        Ok(RawResponse {
            final_url,
            status_code,
            content_type,
            body,
        })
    }
}

/// Builds an HTTP client with the configured identity and timeouts
///
/// # Arguments
///
/// * `config` - The fetcher configuration
/// * `verify_tls` - Whether certificates are validated
///
/// # Example
///
/// ```no_run
/// use route_sounder::config::FetcherConfig;
/// use route_sounder::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default(), true).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig, verify_tls: bool) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .danger_accept_invalid_certs(!verify_tls)
        .gzip(true)
        .brotli(true)
        .build()
}
