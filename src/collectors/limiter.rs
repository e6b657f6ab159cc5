use std::time::Duration;

use rand::Rng;

/// Upper bound of the random jitter added on top of the base delay.
pub const DEFAULT_JITTER: Duration = Duration::from_millis(500);

/// Sleeps between outbound requests: a fixed base plus uniform jitter
/// in `[0, jitter)`.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    base: Duration,
    jitter: Duration,
}

impl RateLimiter {
    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    pub fn with_base(base: Duration) -> Self {
        Self::new(base, DEFAULT_JITTER)
    }

    pub fn next_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.base;
        }
        let extra = rand::rng().random_range(0.0..self.jitter.as_secs_f64());
        self.base + Duration::from_secs_f64(extra)
    }

    pub async fn wait(&self) {
        let delay = self.next_delay();
        tracing::debug!("Waiting {:.2}s before next request", delay.as_secs_f64());
        tokio::time::sleep(delay).await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::with_base(Duration::from_millis(1500))
    }
}
