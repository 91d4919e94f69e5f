use std::time::{Duration, Instant};

/// Enforces a minimum interval between consecutive requests
///
/// The seed worklist uses this as its politeness delay. The first request
/// never waits.
#[derive(Debug, Clone)]
pub struct Pacer {
    /// Minimum time between the starts of two requests
    min_interval: Duration,

    /// Timestamp of the last request
    last_request_time: Option<Instant>,
}

impl Pacer {
    /// Creates a pacer with the given minimum interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request_time: None,
        }
    }

    /// Records that a request was made
    pub fn record_request(&mut self, now: Instant) {
        self.last_request_time = Some(now);
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.duration_since(last);
        if elapsed < self.min_interval {
            Some(self.min_interval - elapsed)
        } else {
            None
        }
    }

    /// Sleeps until the next request is allowed, then records it
    pub async fn wait_turn(&mut self) {
        if let Some(wait) = self.time_until_next_request(Instant::now()) {
            tokio::time::sleep(wait).await;
        }
        self.record_request(Instant::now());
    }
}
