//! Route definitions for the `/schedule` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/schedule`.
///
/// ```text
/// GET /       -> list_schedule (requires auth)
/// GET /week   -> week_view (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedule::list_schedule))
        .route("/week", get(schedule::week_view))
}
