pub mod auth;
pub mod bookings;
pub mod content;
pub mod health;
pub mod slides;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/refresh                           refresh (public)
/// /auth/logout                            logout (requires auth)
/// /auth/me                                current user (requires auth)
///
/// /active-content                         active content (public)
///
/// /bookings                               list, create (owner)
/// /bookings/{id}                          get, set template, cancel (owner)
///
/// /slides                                 list by ?bookingId, create
/// /slides/active                          active content (public)
/// /slides/active/rendered                 active content after templating (public)
/// /slides/defaults                        default slides (admin)
/// /slides/{id}                            update, delete
/// /slides/booking/{booking_id}            delete all of a booking's slides
/// /slides/booking/{booking_id}/order      reorder a booking's slides
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(content::router())
        .nest("/bookings", bookings::router())
        .nest("/slides", slides::router())
}
