//! Handlers for the `/slides` resource.
//!
//! A slide with a `bookingId` is managed by that booking's owner. A slide
//! without one is a default slide and is managed by admins.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use surprise_core::error::CoreError;
use surprise_core::slide::{validate_background_value, validate_title, BackgroundType};
use surprise_core::types::DbId;
use surprise_db::models::slide::{CreateSlide, Slide, UpdateSlide};
use surprise_db::repositories::SlideRepo;

use super::bookings::owned_booking;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{BookingFilterParams, IncludeInactiveParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    pub booking_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub background_type: Option<String>,
    pub background_value: Option<String>,
    pub link_url: Option<String>,
    pub link_title: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlideRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub background_type: Option<String>,
    pub background_value: Option<String>,
    pub link_url: Option<String>,
    pub link_title: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub slide_ids: Option<Vec<DbId>>,
}

#[derive(Debug, Serialize)]
pub struct DeletedCount {
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/slides?bookingId=
pub async fn list_for_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<BookingFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Slide>>>> {
    let booking_id = params
        .booking_id
        .ok_or_else(|| AppError::BadRequest("bookingId is required".into()))?;
    owned_booking(&state, &user, booking_id).await?;

    let slides = SlideRepo::list_for_booking(&state.pool, booking_id).await?;
    Ok(Json(DataResponse { data: slides }))
}

/// GET /api/v1/slides/defaults
pub async fn list_defaults(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Slide>>>> {
    let slides = SlideRepo::list_defaults(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: slides }))
}

/// POST /api/v1/slides
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSlideRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Slide>>)> {
    let (Some(title), Some(background_type), Some(background_value)) =
        (input.title, input.background_type, input.background_value)
    else {
        return Err(AppError::BadRequest(
            "title, backgroundType and backgroundValue are required".into(),
        ));
    };

    let background_type: BackgroundType = background_type.parse()?;
    validate_title(&title)?;
    validate_background_value(background_type, &background_value)?;
    authorize_target(&state, &user, input.booking_id).await?;

    let order = match (input.order, input.booking_id) {
        (Some(order), _) => order,
        (None, Some(booking_id)) => SlideRepo::next_order(&state.pool, booking_id).await?,
        (None, None) => 0,
    };

    let slide = SlideRepo::create(
        &state.pool,
        &CreateSlide {
            booking_id: input.booking_id,
            title: title.trim().to_string(),
            description: input.description,
            background_type,
            background_value,
            link_url: input.link_url,
            link_title: input.link_title,
            order,
            is_active: input.is_active.unwrap_or(true),
        },
    )
    .await?;

    tracing::info!(
        slide_id = slide.id,
        booking_id = ?slide.booking_id,
        background = %slide.background_type,
        "Slide created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

/// PUT /api/v1/slides/{id}
///
/// Partial update: only fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSlideRequest>,
) -> AppResult<Json<DataResponse<Slide>>> {
    let existing = find_slide(&state, id).await?;
    authorize_target(&state, &user, existing.booking_id).await?;

    let background_type = input
        .background_type
        .as_deref()
        .map(str::parse::<BackgroundType>)
        .transpose()?;
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(value) = &input.background_value {
        validate_background_value(background_type.unwrap_or(existing.background_type), value)?;
    }

    let patch = UpdateSlide {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        background_type,
        background_value: input.background_value,
        link_url: input.link_url,
        link_title: input.link_title,
        order: input.order,
        is_active: input.is_active,
    };

    let slide = SlideRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Slide", id }))?;
    Ok(Json(DataResponse { data: slide }))
}

/// DELETE /api/v1/slides/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_slide(&state, id).await?;
    authorize_target(&state, &user, existing.booking_id).await?;

    if SlideRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(slide_id = id, "Slide deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Slide", id }))
    }
}

/// DELETE /api/v1/slides/booking/{booking_id}
pub async fn delete_for_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(booking_id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeletedCount>>> {
    owned_booking(&state, &user, booking_id).await?;
    let deleted = SlideRepo::soft_delete_for_booking(&state.pool, booking_id).await?;
    tracing::info!(booking_id, deleted, "Booking slides deleted");
    Ok(Json(DataResponse {
        data: DeletedCount { deleted },
    }))
}

/// PUT /api/v1/slides/booking/{booking_id}/order
///
/// `slideIds` must name every live slide of the booking exactly once.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(booking_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<Slide>>>> {
    let slide_ids = input
        .slide_ids
        .ok_or_else(|| AppError::BadRequest("slideIds is required".into()))?;
    owned_booking(&state, &user, booking_id).await?;

    let current = SlideRepo::list_for_booking(&state.pool, booking_id).await?;
    if !is_permutation(&slide_ids, current.iter().map(|s| s.id)) {
        return Err(AppError::BadRequest(
            "slideIds must list every slide of the booking exactly once".into(),
        ));
    }

    let slides = SlideRepo::reorder(&state.pool, booking_id, &slide_ids)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Slides changed while reordering; reload and try again".into(),
            ))
        })?;
    Ok(Json(DataResponse { data: slides }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_slide(state: &AppState, id: DbId) -> AppResult<Slide> {
    SlideRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Slide", id }))
}

/// Booking slides need the booking's owner; default slides need an admin.
async fn authorize_target(
    state: &AppState,
    user: &AuthUser,
    booking_id: Option<DbId>,
) -> AppResult<()> {
    match booking_id {
        Some(booking_id) => owned_booking(state, user, booking_id).await.map(|_| ()),
        None if user.is_admin() => Ok(()),
        None => Err(AppError::Core(CoreError::Forbidden(
            "Admin role required to manage default slides".into(),
        ))),
    }
}

fn is_permutation(requested: &[DbId], current: impl Iterator<Item = DbId>) -> bool {
    let current: HashSet<DbId> = current.collect();
    let requested_set: HashSet<DbId> = requested.iter().copied().collect();
    requested_set.len() == requested.len() && requested_set == current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_check() {
        assert!(is_permutation(&[3, 1, 2], [1, 2, 3].into_iter()));
        assert!(is_permutation(&[], std::iter::empty()));
        assert!(!is_permutation(&[1, 2], [1, 2, 3].into_iter()));
        assert!(!is_permutation(&[1, 1, 2], [1, 2].into_iter()));
        assert!(!is_permutation(&[1, 2, 4], [1, 2, 3].into_iter()));
    }
}
