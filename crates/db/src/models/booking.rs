//! Booking rows and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use surprise_core::booking::{BookingStatus, BookingWindow};
use surprise_core::record::RecordState;
use surprise_core::template::TemplateType;
use surprise_core::types::{DbId, Timestamp};

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub recipient_name: String,
    pub hirer_name: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    #[sqlx(try_from = "String")]
    pub template_type: TemplateType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(rename = "deleted_at", try_from = "Option<Timestamp>")]
    #[serde(skip)]
    pub state: RecordState,
}

impl From<Booking> for BookingWindow {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start_date,
            end: booking.end_date,
            status: booking.status,
            template_type: booking.template_type,
            state: booking.state,
        }
    }
}

/// Insert DTO. Validation happens before this is built.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub recipient_name: String,
    pub hirer_name: Option<String>,
    pub template_type: TemplateType,
}

/// Outcome of one lifecycle pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleTransitions {
    pub activated: u64,
    pub completed: u64,
}
