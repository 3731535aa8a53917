//! Fixtures shared by the repository tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use surprise_core::slide::BackgroundType;
use surprise_core::template::TemplateType;
use surprise_core::types::{DbId, Timestamp};
use surprise_db::models::booking::{Booking, CreateBooking};
use surprise_db::models::slide::{CreateSlide, Slide};
use surprise_db::models::user::CreateUser;
use surprise_db::repositories::{BookingRepo, SlideRepo, UserRepo};

/// 2025-05-18 at `hour`:00 UTC.
pub fn at(hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2025, 5, 18, hour, 0, 0).unwrap()
}

pub async fn user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: "user".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn booking(pool: &PgPool, user_id: DbId, start: Timestamp, end: Timestamp) -> Booking {
    BookingRepo::create(
        pool,
        &CreateBooking {
            user_id,
            start_date: start,
            end_date: end,
            recipient_name: "Anna".to_string(),
            hirer_name: Some("Ben".to_string()),
            template_type: TemplateType::Immersive,
        },
    )
    .await
    .unwrap()
}

pub fn new_slide(booking_id: Option<DbId>, title: &str, order: i32) -> CreateSlide {
    CreateSlide {
        booking_id,
        title: title.to_string(),
        description: None,
        background_type: BackgroundType::Solid,
        background_value: "#F5EFEF".to_string(),
        link_url: None,
        link_title: None,
        order,
        is_active: true,
    }
}

pub async fn slide(pool: &PgPool, booking_id: Option<DbId>, title: &str, order: i32) -> Slide {
    SlideRepo::create(pool, &new_slide(booking_id, title, order))
        .await
        .unwrap()
}
