//! Fixed-interval call gate
//!
//! External calls are spaced by a minimum interval. The gate is a value
//! passed to each stage rather than a sleep buried inside the transport, so
//! tests run with a zero interval and the pacing policy lives in one place.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Enforces a minimum delay between consecutive calls.
pub struct RateLimiter {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Gate with the given minimum spacing in milliseconds.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            last_call: Mutex::new(None),
        }
    }

    /// Gate that never waits. Useful in tests.
    #[must_use]
    pub fn unthrottled() -> Self {
        Self::new(0)
    }

    /// Wait until the minimum interval since the previous call has elapsed,
    /// then record this call.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Throttling before next call");
                tokio::time::sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}
