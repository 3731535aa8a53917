//! Capped exponential backoff for failed content polls.

use std::time::Duration;

/// Tunable parameters for the retry delay after a failed poll.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between retries.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
        }
    }
}

/// Tracks consecutive failures and yields the delay before the next attempt.
#[derive(Debug, Clone)]
pub struct Backoff {
    config: BackoffConfig,
    current: Option<Duration>,
}

impl Backoff {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// Record a failure and return how long to wait before retrying.
    pub fn next_delay(&mut self) -> Duration {
        let delay = match self.current {
            None => self.config.initial_delay.min(self.config.max_delay),
            Some(current) => grow(current, &self.config),
        };
        self.current = Some(delay);
        delay
    }

    /// Forget past failures after a successful attempt.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn failures_pending(&self) -> bool {
        self.current.is_some()
    }
}

fn grow(current: Duration, config: &BackoffConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}
