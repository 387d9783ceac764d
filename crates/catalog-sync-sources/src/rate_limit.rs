use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Source key for the quota-constrained anime catalog (3 requests/second).
pub const ANIME_SOURCE_KEY: &str = "anime";

const ANIME_MIN_INTERVAL: Duration = Duration::from_millis(333);

/// Enforces minimum inter-request spacing per source key.
///
/// Constructed once per process and shared across adapters via `Arc`, with
/// no hidden module-level state. `acquire` reserves the caller's dispatch slot
/// before sleeping, so calls sharing a key are totally ordered: a later
/// acquire cannot be released before an earlier one's computed release
/// time. Keys without a configured interval return immediately, and
/// distinct keys never delay each other. There is no queue-depth limit;
/// many concurrent callers simply accumulate cumulative delay.
pub struct RateLimiter {
    min_intervals: HashMap<String, Duration>,
    last_dispatch: Mutex<HashMap<String, Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        let mut min_intervals = HashMap::new();
        min_intervals.insert(ANIME_SOURCE_KEY.to_string(), ANIME_MIN_INTERVAL);
        Self {
            min_intervals,
            last_dispatch: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_interval(mut self, source_key: impl Into<String>, min_interval: Duration) -> Self {
        self.min_intervals.insert(source_key.into(), min_interval);
        self
    }

    /// Suspend the caller until its dispatch slot for `source_key` is due,
    /// recording the slot before sleeping.
    pub async fn acquire(&self, source_key: &str) {
        let min_interval = match self.min_intervals.get(source_key) {
            Some(interval) => *interval,
            None => return,
        };

        let release = {
            let mut last_dispatch = self.last_dispatch.lock().await;
            let now = Instant::now();
            let release = match last_dispatch.get(source_key) {
                Some(previous) => (*previous + min_interval).max(now),
                None => now,
            };
            last_dispatch.insert(source_key.to_string(), release);
            release
        };

        sleep_until(release).await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn spaces_dispatches_sharing_a_key() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        limiter.acquire(ANIME_SOURCE_KEY).await;
        limiter.acquire(ANIME_SOURCE_KEY).await;
        limiter.acquire(ANIME_SOURCE_KEY).await;
        assert!(start.elapsed() >= ANIME_MIN_INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unconfigured_keys_do_not_wait() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        limiter.acquire("tvmaze").await;
        limiter.acquire("tvmaze").await;
        limiter.acquire("tvmaze").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn keys_are_independent() {
        let limiter = RateLimiter::new().with_interval("other", Duration::from_secs(10));
        limiter.acquire("other").await;
        let start = Instant::now();
        limiter.acquire(ANIME_SOURCE_KEY).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_accumulate_delay() {
        let limiter = std::sync::Arc::new(RateLimiter::new());
        let start = Instant::now();
        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    limiter.acquire(ANIME_SOURCE_KEY).await;
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
        assert!(start.elapsed() >= ANIME_MIN_INTERVAL * 3);
    }
}
