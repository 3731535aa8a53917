//! Periodic booking status transitions.
//!
//! Moves bookings `pending -> active` once their window opens and
//! `pending|active -> completed` once it has closed. Visibility on the
//! carousel is governed by the configured status set, so this job only
//! changes what the status says, not whether content shows up on time.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use surprise_db::repositories::{BookingRepo, SessionRepo};
use tokio_util::sync::CancellationToken;

/// Run lifecycle passes every `every` until `cancel` fires.
///
/// Each pass also purges expired or revoked refresh sessions.
pub async fn run(pool: PgPool, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Booking lifecycle job started");

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Booking lifecycle job stopping");
                break;
            }
            _ = interval.tick() => {
                run_once(&pool).await;
            }
        }
    }
}

async fn run_once(pool: &PgPool) {
    match BookingRepo::advance_lifecycle(pool, Utc::now()).await {
        Ok(t) if t.activated > 0 || t.completed > 0 => {
            tracing::info!(
                activated = t.activated,
                completed = t.completed,
                "Booking lifecycle: statuses advanced"
            );
        }
        Ok(_) => tracing::debug!("Booking lifecycle: nothing to advance"),
        Err(e) => tracing::error!(error = %e, "Booking lifecycle: pass failed"),
    }

    match SessionRepo::purge_unusable(pool).await {
        Ok(0) => {}
        Ok(deleted) => tracing::debug!(deleted, "Purged stale refresh sessions"),
        Err(e) => tracing::error!(error = %e, "Session cleanup failed"),
    }
}
