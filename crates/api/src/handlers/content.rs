//! Public active-content endpoints read by the carousel.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use surprise_core::content::{ActiveContent, RenderedContent};

use crate::error::AppResult;
use crate::query::ResolveAtParams;
use crate::state::AppState;

/// GET /api/v1/slides/active (alias: /api/v1/active-content)
///
/// Returns `{ slides, templateType }` for `?at=` or, by default, now.
pub async fn get_active(
    State(state): State<AppState>,
    Query(params): Query<ResolveAtParams>,
) -> AppResult<Json<ActiveContent>> {
    let now = params.at.unwrap_or_else(Utc::now);
    let content = state.resolver.resolve(now).await?;
    tracing::debug!(
        %now,
        slides = content.slides.len(),
        template = %content.template_type,
        "Resolved active content"
    );
    Ok(Json(content))
}

/// GET /api/v1/slides/active/rendered
///
/// Same resolution, with every slide already dispatched through its template.
pub async fn get_active_rendered(
    State(state): State<AppState>,
    Query(params): Query<ResolveAtParams>,
) -> AppResult<Json<RenderedContent>> {
    let now = params.at.unwrap_or_else(Utc::now);
    let content = state.resolver.resolve(now).await?;
    Ok(Json(content.render()))
}
