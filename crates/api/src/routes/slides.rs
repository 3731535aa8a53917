use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{content, slides};
use crate::state::AppState;

/// Routes mounted at `/slides`.
///
/// ```text
/// GET    /                              -> list_for_booking (?bookingId=)
/// POST   /                              -> create
/// GET    /active                        -> content::get_active (public)
/// GET    /active/rendered               -> content::get_active_rendered (public)
/// GET    /defaults                      -> list_defaults (admin)
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// DELETE /booking/{booking_id}          -> delete_for_booking
/// PUT    /booking/{booking_id}/order    -> reorder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(slides::list_for_booking).post(slides::create))
        .route("/active", get(content::get_active))
        .route("/active/rendered", get(content::get_active_rendered))
        .route("/defaults", get(slides::list_defaults))
        .route("/{id}", put(slides::update).delete(slides::delete))
        .route(
            "/booking/{booking_id}",
            axum::routing::delete(slides::delete_for_booking),
        )
        .route("/booking/{booking_id}/order", put(slides::reorder))
}
