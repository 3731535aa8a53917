//! Repository for the `bookings` table.

use sqlx::PgPool;
use surprise_core::booking::BookingStatus;
use surprise_core::template::TemplateType;
use surprise_core::types::{DbId, Timestamp};

use crate::models::booking::{Booking, CreateBooking, LifecycleTransitions};

const COLUMNS: &str = "id, user_id, start_date, end_date, recipient_name, hirer_name, \
                       status, template_type, created_at, updated_at, deleted_at";

pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking in `pending` status.
    ///
    /// Callers check [`BookingRepo::find_overlapping`] first. A concurrent
    /// insert that slips past the check fails on `ex_bookings_no_overlap`.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (user_id, start_date, end_date, recipient_name, hirer_name, status, template_type)
             VALUES ($1, $2, $3, $4, $5, 'pending', $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.user_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.recipient_name)
            .bind(&input.hirer_name)
            .bind(input.template_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// First live booking whose inclusive window intersects `[start, end]`.
    pub async fn find_overlapping(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE deleted_at IS NULL
               AND start_date <= $2
               AND end_date >= $1
             ORDER BY start_date ASC, id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(start)
            .bind(end)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live booking owned by `user_id`. Someone else's booking is
    /// reported the same as a missing one.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's live bookings, soonest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY start_date ASC, id ASC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Live bookings whose inclusive window contains `at` and whose status
    /// is one of `statuses`. Latest start first.
    pub async fn list_covering(
        pool: &PgPool,
        at: Timestamp,
        statuses: &[BookingStatus],
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE deleted_at IS NULL
               AND start_date <= $1
               AND end_date >= $1
               AND status = ANY($2)
             ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(at)
            .bind(&statuses)
            .fetch_all(pool)
            .await
    }

    /// Set the template on a booking the user owns.
    ///
    /// Returns `None` if the booking does not exist, is deleted, or belongs
    /// to another user.
    pub async fn update_template(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        template_type: TemplateType,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET template_type = $3
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(user_id)
            .bind(template_type.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a booking the user owns together with all its slides.
    ///
    /// Returns `true` if the booking was marked deleted.
    pub async fn soft_delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE bookings SET deleted_at = NOW()
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE slides SET deleted_at = NOW() WHERE booking_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Move bookings along `pending -> active -> completed` according to
    /// their window relative to `now`.
    pub async fn advance_lifecycle(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<LifecycleTransitions, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let completed = sqlx::query(
            "UPDATE bookings SET status = 'completed'
             WHERE deleted_at IS NULL
               AND status IN ('pending', 'active')
               AND end_date < $1",
        )
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let activated = sqlx::query(
            "UPDATE bookings SET status = 'active'
             WHERE deleted_at IS NULL
               AND status = 'pending'
               AND start_date <= $1
               AND end_date >= $1",
        )
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok(LifecycleTransitions {
            activated,
            completed,
        })
    }
}
