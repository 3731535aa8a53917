use std::time::Duration;

use crate::backoff::BackoffConfig;

/// Carousel client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CarouselConfig {
    /// Base URL of the API, without the `/api/v1` prefix.
    pub api_url: String,
    /// Time between successful content polls.
    pub poll_interval: Duration,
    /// Time each slide stays on screen.
    pub rotate_interval: Duration,
    /// Retry schedule after a failed poll. `max_delay` follows the poll
    /// interval so a failing API is never polled less often than a healthy one.
    pub backoff: BackoffConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000".into(), 60, 5)
    }
}

impl CarouselConfig {
    pub fn new(api_url: String, poll_secs: u64, rotate_secs: u64) -> Self {
        let poll_interval = Duration::from_secs(poll_secs);
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            poll_interval,
            rotate_interval: Duration::from_secs(rotate_secs),
            backoff: BackoffConfig {
                max_delay: poll_interval,
                ..BackoffConfig::default()
            },
        }
    }

    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `CAROUSEL_API_URL`     | `http://localhost:3000` |
    /// | `CAROUSEL_POLL_SECS`   | `60`                    |
    /// | `CAROUSEL_ROTATE_SECS` | `5`                     |
    ///
    /// # Panics
    ///
    /// Panics if an interval is not a positive integer.
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("CAROUSEL_API_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let poll_secs: u64 = std::env::var("CAROUSEL_POLL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("CAROUSEL_POLL_SECS must be a valid u64");
        assert!(poll_secs > 0, "CAROUSEL_POLL_SECS must be greater than zero");

        let rotate_secs: u64 = std::env::var("CAROUSEL_ROTATE_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("CAROUSEL_ROTATE_SECS must be a valid u64");
        assert!(rotate_secs > 0, "CAROUSEL_ROTATE_SECS must be greater than zero");

        Self::new(api_url, poll_secs, rotate_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.rotate_interval, Duration::from_secs(5));
        assert_eq!(config.backoff.max_delay, config.poll_interval);
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = CarouselConfig::new("http://carousel.local/".into(), 30, 5);
        assert_eq!(config.api_url, "http://carousel.local");
        assert_eq!(config.backoff.max_delay, Duration::from_secs(30));
    }
}
