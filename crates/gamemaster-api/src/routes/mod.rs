//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod adventures;
pub mod health;
pub mod session;

/// Returns the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/sessions", session::router())
        .nest("/api/v1/adventures", adventures::router())
}
