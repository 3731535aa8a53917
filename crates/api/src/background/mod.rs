//! Background jobs.
//!
//! Each submodule provides a long-running async function meant for
//! `tokio::spawn` that stops when its [`CancellationToken`] fires.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod booking_lifecycle;
