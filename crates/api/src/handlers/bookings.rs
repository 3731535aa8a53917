//! Handlers for the `/bookings` resource.
//!
//! Every route is scoped to the caller: another user's booking is reported
//! as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use surprise_core::booking::{validate_booking_window, validate_name};
use surprise_core::error::CoreError;
use surprise_core::template::TemplateType;
use surprise_core::types::{DbId, Timestamp};
use surprise_db::models::booking::{Booking, CreateBooking};
use surprise_db::repositories::BookingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub recipient_name: Option<String>,
    pub hirer_name: Option<String>,
    pub template_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    pub template_type: Option<String>,
}

/// GET /api/v1/bookings
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Booking>>>> {
    let bookings = BookingRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// POST /api/v1/bookings
///
/// Rejects a window that shares any instant with a live booking (409).
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    let (Some(start_date), Some(end_date), Some(recipient_name)) =
        (input.start_date, input.end_date, input.recipient_name)
    else {
        return Err(AppError::BadRequest(
            "startDate, endDate and recipientName are required".into(),
        ));
    };

    validate_booking_window(start_date, end_date)?;
    validate_name("recipientName", &recipient_name)?;
    let hirer_name = input
        .hirer_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    if let Some(name) = &hirer_name {
        validate_name("hirerName", name)?;
    }

    let overlapping = BookingRepo::find_overlapping(&state.pool, start_date, end_date).await?;
    if let Some(existing) = overlapping {
        tracing::debug!(
            existing_id = existing.id,
            %start_date,
            %end_date,
            "Booking rejected: window overlaps"
        );
        return Err(AppError::Core(CoreError::Conflict(
            "This time slot overlaps with an existing booking".into(),
        )));
    }

    let booking = BookingRepo::create(
        &state.pool,
        &CreateBooking {
            user_id: user.user_id,
            start_date,
            end_date,
            recipient_name: recipient_name.trim().to_string(),
            hirer_name,
            template_type: TemplateType::resolve(input.template_type.as_deref()),
        },
    )
    .await?;

    tracing::info!(
        booking_id = booking.id,
        user_id = user.user_id,
        %start_date,
        %end_date,
        "Booking created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = BookingRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    Ok(Json(DataResponse { data: booking }))
}

/// PATCH /api/v1/bookings/{id}
///
/// Sets the presentation template. Any value other than `"split"` selects
/// the immersive template; a missing value is a 400.
pub async fn update_template(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTemplateRequest>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let tag = input
        .template_type
        .ok_or_else(|| AppError::BadRequest("templateType is required".into()))?;
    let template_type = TemplateType::resolve(Some(&tag));

    let booking = BookingRepo::update_template(&state.pool, id, user.user_id, template_type)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    tracing::info!(
        booking_id = id,
        requested = %tag,
        template = %template_type,
        "Booking template updated"
    );
    Ok(Json(DataResponse { data: booking }))
}

/// DELETE /api/v1/bookings/{id}
///
/// Soft-deletes the booking and its slides.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BookingRepo::soft_delete_for_user(&state.pool, id, user.user_id).await? {
        tracing::info!(booking_id = id, user_id = user.user_id, "Booking cancelled");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))
    }
}

/// Load a live booking the caller owns, or 404.
pub(crate) async fn owned_booking(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Booking> {
    BookingRepo::find_for_user(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))
}
