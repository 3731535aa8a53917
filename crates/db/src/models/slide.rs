//! Slide rows and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use surprise_core::record::RecordState;
use surprise_core::slide::{BackgroundType, SlideContent, SlideRecord};
use surprise_core::types::{DbId, Timestamp};

/// A row from the `slides` table. `booking_id` is `None` for default slides.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: DbId,
    pub booking_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub background_type: BackgroundType,
    pub background_value: String,
    pub link_url: Option<String>,
    pub link_title: Option<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(rename = "deleted_at", try_from = "Option<Timestamp>")]
    #[serde(skip)]
    pub state: RecordState,
}

impl From<Slide> for SlideRecord {
    fn from(slide: Slide) -> Self {
        Self {
            id: slide.id,
            booking_id: slide.booking_id,
            title: slide.title,
            description: slide.description,
            background_type: slide.background_type,
            background_value: slide.background_value,
            link_url: slide.link_url,
            link_title: slide.link_title,
            order: slide.order,
            is_active: slide.is_active,
            created_at: slide.created_at,
            state: slide.state,
        }
    }
}

impl From<Slide> for SlideContent {
    fn from(slide: Slide) -> Self {
        SlideRecord::from(slide).into()
    }
}

#[derive(Debug, Clone)]
pub struct CreateSlide {
    pub booking_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub background_type: BackgroundType,
    pub background_value: String,
    pub link_url: Option<String>,
    pub link_title: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

/// Patch DTO. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateSlide {
    pub title: Option<String>,
    pub description: Option<String>,
    pub background_type: Option<BackgroundType>,
    pub background_value: Option<String>,
    pub link_url: Option<String>,
    pub link_title: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}
