//! Route definitions for the `/activities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::activities;
use crate::state::AppState;

/// Routes mounted at `/activities`.
///
/// ```text
/// GET  /  -> list_activities (requires auth)
/// POST /  -> create_activity (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(activities::list_activities).post(activities::create_activity),
    )
}
