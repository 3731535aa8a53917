//! Postgres-backed [`ContentStore`].

use async_trait::async_trait;
use surprise_core::booking::{BookingStatus, BookingWindow};
use surprise_core::content::ContentStore;
use surprise_core::slide::SlideRecord;
use surprise_core::types::{DbId, Timestamp};

use crate::repositories::{BookingRepo, SlideRepo};
use crate::DbPool;

/// Reads bookings and slides straight from the pool on every call.
#[derive(Debug, Clone)]
pub struct PgContentStore {
    pool: DbPool,
}

impl PgContentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    type Error = sqlx::Error;

    async fn bookings_covering(
        &self,
        now: Timestamp,
        statuses: &[BookingStatus],
    ) -> Result<Vec<BookingWindow>, Self::Error> {
        let rows = BookingRepo::list_covering(&self.pool, now, statuses).await?;
        Ok(rows.into_iter().map(BookingWindow::from).collect())
    }

    async fn booking_slides(&self, booking_id: DbId) -> Result<Vec<SlideRecord>, Self::Error> {
        let rows = SlideRepo::list_for_booking(&self.pool, booking_id).await?;
        Ok(rows.into_iter().map(SlideRecord::from).collect())
    }

    async fn default_slides(&self) -> Result<Vec<SlideRecord>, Self::Error> {
        let rows = SlideRepo::list_defaults(&self.pool, false).await?;
        Ok(rows.into_iter().map(SlideRecord::from).collect())
    }
}
