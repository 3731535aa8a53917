//! Integration tests for the booking repository.

mod common;

use assert_matches::assert_matches;
use chrono::Duration;
use sqlx::PgPool;
use surprise_core::booking::BookingStatus;
use surprise_core::record::RecordState;
use surprise_core::template::TemplateType;
use surprise_db::repositories::{BookingRepo, SlideRepo};

use common::{at, booking, slide, user};

// ---------------------------------------------------------------------------
// Create / overlap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_starts_pending(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let created = booking(&pool, owner, at(8), at(12)).await;

    assert_eq!(created.status, BookingStatus::Pending);
    assert_eq!(created.template_type, TemplateType::Immersive);
    assert_eq!(created.state, RecordState::Active);
    assert_eq!(created.hirer_name.as_deref(), Some("Ben"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_overlapping_catches_containment_and_edges(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let existing = booking(&pool, owner, at(8), at(12)).await;

    // Fully inside.
    let hit = BookingRepo::find_overlapping(&pool, at(9), at(10)).await.unwrap();
    assert_eq!(hit.map(|b| b.id), Some(existing.id));

    // Fully containing.
    let hit = BookingRepo::find_overlapping(&pool, at(7), at(13)).await.unwrap();
    assert_eq!(hit.map(|b| b.id), Some(existing.id));

    // Touching the end instant.
    let hit = BookingRepo::find_overlapping(&pool, at(12), at(14)).await.unwrap();
    assert_eq!(hit.map(|b| b.id), Some(existing.id));

    // Disjoint.
    let miss = BookingRepo::find_overlapping(&pool, at(13), at(14)).await.unwrap();
    assert!(miss.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exclusion_constraint_rejects_overlap(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    booking(&pool, owner, at(8), at(12)).await;

    let err = sqlx::query(
        "INSERT INTO bookings (user_id, start_date, end_date, recipient_name)
         VALUES ($1, $2, $3, 'Carl')",
    )
    .bind(owner)
    .bind(at(10))
    .bind(at(14))
    .execute(&pool)
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23P01"));
    assert_eq!(db_err.constraint(), Some("ex_bookings_no_overlap"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_booking_frees_its_window(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let first = booking(&pool, owner, at(8), at(12)).await;
    assert!(BookingRepo::soft_delete_for_user(&pool, first.id, owner).await.unwrap());

    assert!(BookingRepo::find_overlapping(&pool, at(9), at(10)).await.unwrap().is_none());
    booking(&pool, owner, at(9), at(10)).await;
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_template_requires_owner(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let stranger = user(&pool, "stranger@example.com").await;
    let b = booking(&pool, owner, at(8), at(12)).await;

    let denied = BookingRepo::update_template(&pool, b.id, stranger, TemplateType::Split)
        .await
        .unwrap();
    assert!(denied.is_none());

    let updated = BookingRepo::update_template(&pool, b.id, owner, TemplateType::Split)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.template_type, TemplateType::Split);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_user_only_returns_own_live_bookings(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let other = user(&pool, "other@example.com").await;
    let later = booking(&pool, owner, at(14), at(16)).await;
    let earlier = booking(&pool, owner, at(8), at(10)).await;
    let gone = booking(&pool, owner, at(18), at(19)).await;
    booking(&pool, other, at(11), at(12)).await;
    BookingRepo::soft_delete_for_user(&pool, gone.id, owner).await.unwrap();

    let ids: Vec<_> = BookingRepo::list_for_user(&pool, owner)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec![earlier.id, later.id]);
}

// ---------------------------------------------------------------------------
// Soft delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_cascades_to_slides(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let b = booking(&pool, owner, at(8), at(12)).await;
    slide(&pool, Some(b.id), "one", 0).await;
    slide(&pool, Some(b.id), "two", 1).await;
    let default = slide(&pool, None, "default", 0).await;

    assert!(BookingRepo::soft_delete_for_user(&pool, b.id, owner).await.unwrap());
    assert!(!BookingRepo::soft_delete_for_user(&pool, b.id, owner).await.unwrap());

    assert!(BookingRepo::find_by_id(&pool, b.id).await.unwrap().is_none());
    assert!(SlideRepo::list_for_booking(&pool, b.id).await.unwrap().is_empty());
    assert!(SlideRepo::find_by_id(&pool, default.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_by_stranger_is_noop(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let stranger = user(&pool, "stranger@example.com").await;
    let b = booking(&pool, owner, at(8), at(12)).await;
    slide(&pool, Some(b.id), "one", 0).await;

    assert!(!BookingRepo::soft_delete_for_user(&pool, b.id, stranger).await.unwrap());
    assert_eq!(SlideRepo::list_for_booking(&pool, b.id).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Coverage and lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_covering_filters_status_and_edges(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let b = booking(&pool, owner, at(8), at(12)).await;
    let visible = [BookingStatus::Pending, BookingStatus::Active];

    for instant in [at(8), at(10), at(12)] {
        let rows = BookingRepo::list_covering(&pool, instant, &visible).await.unwrap();
        assert_eq!(rows.len(), 1, "at {instant}");
        assert_eq!(rows[0].id, b.id);
    }

    let after = BookingRepo::list_covering(&pool, at(12) + Duration::seconds(1), &visible)
        .await
        .unwrap();
    assert!(after.is_empty());

    let active_only = BookingRepo::list_covering(&pool, at(10), &[BookingStatus::Active])
        .await
        .unwrap();
    assert!(active_only.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_advance_lifecycle(pool: PgPool) {
    let owner = user(&pool, "owner@example.com").await;
    let past = booking(&pool, owner, at(1), at(2)).await;
    let current = booking(&pool, owner, at(8), at(12)).await;
    let future = booking(&pool, owner, at(20), at(22)).await;

    let transitions = BookingRepo::advance_lifecycle(&pool, at(10)).await.unwrap();
    assert_eq!(transitions.activated, 1);
    assert_eq!(transitions.completed, 1);

    let status = |id| {
        let pool = pool.clone();
        async move { BookingRepo::find_by_id(&pool, id).await.unwrap().unwrap().status }
    };
    assert_matches!(status(past.id).await, BookingStatus::Completed);
    assert_matches!(status(current.id).await, BookingStatus::Active);
    assert_matches!(status(future.id).await, BookingStatus::Pending);

    // A second pass at the same instant has nothing to do.
    let again = BookingRepo::advance_lifecycle(&pool, at(10)).await.unwrap();
    assert_eq!(again, Default::default());
}
