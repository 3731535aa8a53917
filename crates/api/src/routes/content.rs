use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Public content alias mounted at the API root.
///
/// ```text
/// GET /active-content -> get_active
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/active-content", get(content::get_active))
}
