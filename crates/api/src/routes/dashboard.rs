//! Route definitions for the admin dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /stats  -> get_stats (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(dashboard::get_stats))
}
