//! Background task that polls for content and rotates slides.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::backoff::Backoff;
use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::source::ContentSource;
use crate::state::CarouselState;

/// Drives a [`CarouselState`] from a [`ContentSource`].
pub struct CarouselPoller<S> {
    source: S,
    state: Arc<RwLock<CarouselState>>,
    config: CarouselConfig,
}

/// Owns the running poller task.
pub struct CarouselHandle {
    task: JoinHandle<()>,
    cancel: CancellationToken,
    state: Arc<RwLock<CarouselState>>,
}

impl CarouselHandle {
    /// Shared view of what the carousel is showing.
    pub fn state(&self) -> Arc<RwLock<CarouselState>> {
        Arc::clone(&self.state)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop both timers and wait for the task to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Carousel task panicked");
        }
    }
}

impl<S: ContentSource> CarouselPoller<S> {
    pub fn new(source: S, config: CarouselConfig) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(CarouselState::new())),
            config,
        }
    }

    pub fn state(&self) -> Arc<RwLock<CarouselState>> {
        Arc::clone(&self.state)
    }

    /// Fetch once and install the result. On failure the state is untouched.
    pub async fn poll_once(&self) -> Result<bool, CarouselError> {
        let content = self.source.fetch().await?;
        let slides = content.slides.len();
        let template = content.template_type;
        let changed = self.state.write().await.apply(content);
        if changed {
            tracing::info!(slides, %template, "Carousel content updated");
        }
        Ok(changed)
    }

    /// Start polling immediately and rotating every `rotate_interval`.
    pub fn spawn(self) -> CarouselHandle {
        let cancel = CancellationToken::new();
        let state = self.state();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            self.run(task_cancel).await;
        });

        CarouselHandle {
            task,
            cancel,
            state,
        }
    }

    async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            poll_secs = self.config.poll_interval.as_secs(),
            rotate_secs = self.config.rotate_interval.as_secs(),
            "Carousel started"
        );

        let mut backoff = Backoff::new(self.config.backoff.clone());
        let mut next_poll = Instant::now();
        let mut next_rotate = Instant::now() + self.config.rotate_interval;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Carousel stopping");
                    break;
                }
                _ = sleep_until(next_poll) => {
                    next_poll = match self.poll_once().await {
                        Ok(changed) => {
                            if backoff.failures_pending() {
                                tracing::info!("Carousel content source recovered");
                            }
                            backoff.reset();
                            if changed {
                                next_rotate = Instant::now() + self.config.rotate_interval;
                            }
                            Instant::now() + self.config.poll_interval
                        }
                        Err(e) => {
                            let delay = backoff.next_delay();
                            tracing::warn!(
                                error = %e,
                                retry_in_secs = delay.as_secs(),
                                "Carousel poll failed, keeping current content"
                            );
                            Instant::now() + delay
                        }
                    };
                }
                _ = sleep_until(next_rotate) => {
                    let mut state = self.state.write().await;
                    if state.len() > 1 {
                        let index = state.index();
                        let title = state.next().title.clone();
                        tracing::info!(from = index, to = state.index(), %title, "Showing slide");
                    }
                    next_rotate = Instant::now() + self.config.rotate_interval;
                }
            }
        }
    }
}
