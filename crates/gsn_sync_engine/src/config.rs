//! Configuration for the sync engine.

use std::time::Duration;

/// Configuration for sync cycles.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Upper bound on a single snapshot fetch.
    pub fetch_timeout: Duration,
    /// How long the engine reports [`SyncState::Success`](crate::SyncState::Success)
    /// before falling back to idle.
    pub success_hold: Duration,
    /// Retry configuration.
    pub retry: RetryConfig,
}

impl SyncConfig {
    /// Creates a sync configuration with default timings.
    pub fn new() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            success_hold: Duration::from_secs(3),
            retry: RetryConfig::default(),
        }
    }

    /// Sets the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Sets how long the success state is held.
    pub fn with_success_hold(mut self, hold: Duration) -> Self {
        self.success_hold = hold;
        self
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Backoff between the fetch attempts of one sync cycle.
///
/// The first fetch never waits. Before fetch `n` (counting from 0) the
/// engine sleeps `initial_delay * backoff_multiplier^(n - 1)`, capped at
/// `max_delay` and optionally stretched by up to a quarter.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Fetches per cycle, the first one included.
    pub max_attempts: u32,
    /// Wait before the second fetch.
    pub initial_delay: Duration,
    /// Longest wait between two fetches.
    pub max_delay: Duration,
    /// Growth factor of the wait. Negative or NaN counts as zero.
    pub backoff_multiplier: f64,
    /// Stretch each wait by a random 0 to 25 %.
    pub add_jitter: bool,
}

impl RetryConfig {
    /// Up to `max_attempts` fetches, waiting 500 ms, then doubling up to
    /// 10 s, with jitter.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            add_jitter: true,
        }
    }

    /// One fetch per cycle; failures are final.
    pub fn no_retry() -> Self {
        Self::new(1).with_jitter(false)
    }

    /// Wait before the second fetch.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Cap on every wait.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Growth factor between consecutive waits.
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Turns jitter on or off.
    pub fn with_jitter(mut self, add_jitter: bool) -> Self {
        self.add_jitter = add_jitter;
        self
    }

    /// Wait before fetch number `attempt`; zero for the first fetch.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let Some(retry) = attempt.checked_sub(1) else {
            return Duration::ZERO;
        };
        let growth = self
            .backoff_multiplier
            .max(0.0)
            .powi(i32::try_from(retry).unwrap_or(i32::MAX));
        let cap = self.max_delay.as_secs_f64();
        let mut secs = (self.initial_delay.as_secs_f64() * growth).min(cap).max(0.0);
        if self.add_jitter {
            secs += secs * 0.25 * rand::random::<f64>();
        }
        Duration::try_from_secs_f64(secs).unwrap_or(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3)
    }
}
