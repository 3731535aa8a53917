//! The public active-content endpoints end to end.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, patch_json_auth, post_json_auth, user_with_token};
use serde_json::{json, Value};
use sqlx::PgPool;
use surprise_core::slide::PLACEHOLDER_TITLE;

const DURING: &str = "2025-05-18T09:00:00Z";
const AFTER: &str = "2025-05-18T13:00:00Z";

async fn active(pool: &PgPool, at: &str) -> Value {
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/slides/active?at={at}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

fn titles(content: &Value) -> Vec<String> {
    content["slides"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

/// Ben books 08:00-12:00 UTC on 2025-05-18 for Anna and adds three slides.
async fn birthday_booking(pool: &PgPool, token: &str) -> i64 {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/bookings",
        json!({
            "startDate": "2025-05-18T08:00:00Z",
            "endDate": "2025-05-18T12:00:00Z",
            "recipientName": "Anna",
            "hirerName": "Ben",
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    for (title, background_type, value) in [
        ("Happy Birthday Anna!", "gradient", "linear-gradient(135deg, #FEADA6, #F5EFEF)"),
        ("Dinner at 8", "image", "/uploads/slides/dinner.jpg"),
        ("Love, Ben", "solid", "#F5EFEF"),
    ] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/slides",
            json!({
                "bookingId": booking_id,
                "title": title,
                "backgroundType": background_type,
                "backgroundValue": value,
            }),
            token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    booking_id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_system_shows_placeholder(pool: PgPool) {
    let content = active(&pool, DURING).await;
    assert_eq!(titles(&content), vec![PLACEHOLDER_TITLE]);
    assert_eq!(content["templateType"], "immersive");
    assert!(content["slides"][0]["id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_slides_show_during_the_window(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "ben@example.com", "user").await;
    let booking_id = birthday_booking(&pool, &token).await;

    let content = active(&pool, DURING).await;
    assert_eq!(
        titles(&content),
        vec!["Happy Birthday Anna!", "Dinner at 8", "Love, Ben"]
    );
    assert_eq!(content["templateType"], "immersive");
    assert_eq!(content["slides"][1]["bookingId"], booking_id);

    // Window edges are inclusive.
    let at_end = active(&pool, "2025-05-18T12:00:00Z").await;
    assert_eq!(titles(&at_end).len(), 3);

    let after = active(&pool, AFTER).await;
    assert_eq!(titles(&after), vec![PLACEHOLDER_TITLE]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn template_change_is_reflected(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "ben@example.com", "user").await;
    let booking_id = birthday_booking(&pool, &token).await;

    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}"),
        json!({ "templateType": "split" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let content = active(&pool, DURING).await;
    assert_eq!(content["templateType"], "split");
    assert_eq!(titles(&content).len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn defaults_fill_in_outside_bookings(pool: PgPool) {
    let (_, ben) = user_with_token(&pool, "ben@example.com", "user").await;
    let (_, admin) = user_with_token(&pool, "admin@example.com", "admin").await;
    birthday_booking(&pool, &ben).await;

    for (title, is_active) in [("Welcome", true), ("Hidden", false), ("Book now", true)] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/slides",
            json!({
                "title": title,
                "backgroundType": "solid",
                "backgroundValue": "#fff",
                "isActive": is_active,
            }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let content = active(&pool, AFTER).await;
    assert_eq!(titles(&content), vec!["Welcome", "Book now"]);
    assert_eq!(content["templateType"], "immersive");

    // The booking still takes precedence inside its window.
    let during = active(&pool, DURING).await;
    assert_eq!(titles(&during)[0], "Happy Birthday Anna!");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelled_booking_disappears(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "ben@example.com", "user").await;
    let booking_id = birthday_booking(&pool, &token).await;

    let response = common::delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(titles(&active(&pool, DURING).await), vec![PLACEHOLDER_TITLE]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_content_alias_matches(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "ben@example.com", "user").await;
    birthday_booking(&pool, &token).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/active-content?at={DURING}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, active(&pool, DURING).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rendered_content_uses_the_template(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "ben@example.com", "user").await;
    let booking_id = birthday_booking(&pool, &token).await;
    patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}"),
        json!({ "templateType": "split" }),
        &token,
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/slides/active/rendered?at={DURING}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["containerClass"], "split-template");

    let fragments = json["fragments"].as_array().unwrap();
    assert_eq!(fragments.len(), 3);
    assert!(fragments.iter().all(|f| f["layout"] == "split"));
    assert_eq!(fragments[1]["image"]["imageUrl"], "/uploads/slides/dinner.jpg");
    assert!(fragments[2]["image"]["imageUrl"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bad_at_parameter_is_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/slides/active?at=yesterday").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
