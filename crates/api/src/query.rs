//! Query parameter types shared across handler modules.

use serde::Deserialize;
use surprise_core::types::{DbId, Timestamp};

/// `?includeInactive=true` on list endpoints for soft-deactivated rows.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?at=<RFC 3339>` overrides the resolution instant (defaults to now).
#[derive(Debug, Default, Deserialize)]
pub struct ResolveAtParams {
    pub at: Option<Timestamp>,
}

/// `?bookingId=` on slide listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilterParams {
    pub booking_id: Option<DbId>,
}
