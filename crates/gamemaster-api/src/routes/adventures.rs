//! Routes for stored adventures.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use gamemaster_core::record::AdventureSummary;
use gamemaster_session::application::query_handlers::{self, AdventureView};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
#[instrument(skip(state))]
async fn list_adventures(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdventureSummary>>, ApiError> {
    let summaries = query_handlers::list_adventures(&*state.adventure_repository).await?;
    Ok(Json(summaries))
}

/// GET /{name}
#[instrument(skip(state))]
async fn get_adventure(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AdventureView>, ApiError> {
    let view = query_handlers::get_adventure(&name, &*state.adventure_repository).await?;
    Ok(Json(view))
}

/// Returns the router for stored adventures.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_adventures))
        .route("/{name}", get(get_adventure))
}
