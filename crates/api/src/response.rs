//! Response envelope for the management endpoints.
//!
//! Booking, slide and auth-adjacent resources are wrapped in `{ "data": ... }`.
//! The public content endpoints return their payload bare so the carousel
//! client reads `{ slides, templateType }` directly.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
