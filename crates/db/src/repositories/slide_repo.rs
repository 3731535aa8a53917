//! Repository for the `slides` table.
//!
//! Slides with a `booking_id` belong to that booking; slides without one are
//! the default set shown when no booking is current.

use sqlx::PgPool;
use surprise_core::types::DbId;

use crate::models::slide::{CreateSlide, Slide, UpdateSlide};

const COLUMNS: &str = "id, booking_id, title, description, background_type, \
                       background_value, link_url, link_title, sort_order, is_active, \
                       created_at, updated_at, deleted_at";

pub struct SlideRepo;

impl SlideRepo {
    pub async fn create(pool: &PgPool, input: &CreateSlide) -> Result<Slide, sqlx::Error> {
        let query = format!(
            "INSERT INTO slides
                (booking_id, title, description, background_type, background_value,
                 link_url, link_title, sort_order, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(input.booking_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.background_type.as_str())
            .bind(&input.background_value)
            .bind(&input.link_url)
            .bind(&input.link_title)
            .bind(input.order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Slide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slides WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Live slides of a booking in display order.
    pub async fn list_for_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Vec<Slide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slides
             WHERE booking_id = $1 AND deleted_at IS NULL
             ORDER BY sort_order ASC, created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(booking_id)
            .fetch_all(pool)
            .await
    }

    /// Live default slides, oldest first. Inactive ones are skipped unless
    /// `include_inactive` is set.
    pub async fn list_defaults(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<Slide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slides
             WHERE booking_id IS NULL
               AND deleted_at IS NULL
               AND ($1 OR is_active = true)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Next free `sort_order` in a booking.
    pub async fn next_order(pool: &PgPool, booking_id: DbId) -> Result<i32, sqlx::Error> {
        let (next,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM slides
             WHERE booking_id = $1 AND deleted_at IS NULL",
        )
        .bind(booking_id)
        .fetch_one(pool)
        .await?;
        Ok(next)
    }

    /// Apply the `Some` fields of `input`.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSlide,
    ) -> Result<Option<Slide>, sqlx::Error> {
        let query = format!(
            "UPDATE slides SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                background_type = COALESCE($4, background_type),
                background_value = COALESCE($5, background_value),
                link_url = COALESCE($6, link_url),
                link_title = COALESCE($7, link_title),
                sort_order = COALESCE($8, sort_order),
                is_active = COALESCE($9, is_active)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.background_type.map(|t| t.as_str()))
            .bind(&input.background_value)
            .bind(&input.link_url)
            .bind(&input.link_title)
            .bind(input.order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE slides SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete every live slide of a booking. Returns the count removed.
    pub async fn soft_delete_for_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE slides SET deleted_at = NOW() WHERE booking_id = $1 AND deleted_at IS NULL",
        )
        .bind(booking_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Renumber a booking's slides to match `slide_ids` (position 0 first).
    ///
    /// All-or-nothing: if any id is not a live slide of the booking nothing
    /// changes and `None` is returned. Otherwise returns the reordered list.
    pub async fn reorder(
        pool: &PgPool,
        booking_id: DbId,
        slide_ids: &[DbId],
    ) -> Result<Option<Vec<Slide>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE slides s SET sort_order = (v.ord - 1)::int
             FROM UNNEST($2::bigint[]) WITH ORDINALITY AS v(id, ord)
             WHERE s.id = v.id AND s.booking_id = $1 AND s.deleted_at IS NULL",
        )
        .bind(booking_id)
        .bind(slide_ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated != slide_ids.len() as u64 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Self::list_for_booking(pool, booking_id).await.map(Some)
    }
}
