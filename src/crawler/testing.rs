//! In-memory transport and sink for unit tests

use crate::crawler::transport::{RawResponse, Transport, TransportError};
use crate::crawler::Fetcher;
use crate::progress::{DiscoveryEvent, ProgressSink};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Serves canned responses keyed by exact URL; anything else is a 404
#[derive(Default)]
pub struct StubTransport {
    routes: HashMap<String, RawResponse>,
    unreachable: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` as HTML with status 200
    pub fn page(self, url: &str, body: &str) -> Self {
        self.respond(url, 200, "text/html", body)
    }

    pub fn respond(mut self, url: &str, status_code: u16, content_type: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            RawResponse {
                final_url: url.to_string(),
                status_code,
                content_type: Some(content_type.to_string()),
                body: body.to_string(),
            },
        );
        self
    }

    /// Makes `url` fail with a connection error
    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.push(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == url).count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());

        if self.unreachable.iter().any(|u| u == url.as_str()) {
            return Err(TransportError::Connect("connection refused".to_string()));
        }

        Ok(self.routes.get(url.as_str()).cloned().unwrap_or(RawResponse {
            final_url: url.to_string(),
            status_code: 404,
            content_type: Some("text/html".to_string()),
            body: "Not Found".to_string(),
        }))
    }
}

/// Keeps every event it receives
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<DiscoveryEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<DiscoveryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, event: &DiscoveryEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A single-attempt fetcher over `transport`
pub fn stub_fetcher(transport: Arc<StubTransport>, sink: Arc<dyn ProgressSink>) -> Fetcher {
    Fetcher::with_retry_policy(transport, 1, Duration::ZERO, sink)
}

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}
