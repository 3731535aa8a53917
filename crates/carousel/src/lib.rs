//! Client side of the public carousel.
//!
//! A [`CarouselPoller`] periodically fetches the resolved active content
//! from the API, keeps the last content that loaded successfully and
//! rotates through its slides. [`CarouselPoller::spawn`] hands back a
//! [`CarouselHandle`] that owns the task; dropping the process or calling
//! [`CarouselHandle::shutdown`] is the only way the timers stop.

pub mod backoff;
pub mod config;
pub mod error;
pub mod poller;
pub mod source;
pub mod state;

pub use config::CarouselConfig;
pub use error::CarouselError;
pub use poller::{CarouselHandle, CarouselPoller};
pub use source::{ContentSource, HttpContentSource};
pub use state::CarouselState;
