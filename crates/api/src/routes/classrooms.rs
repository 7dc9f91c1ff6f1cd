//! Route definitions for the `/classrooms` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::classrooms;
use crate::state::AppState;

/// Routes mounted at `/classrooms`.
///
/// ```text
/// GET    /      -> list_classrooms (requires auth)
/// POST   /      -> create_classroom (admin only)
/// PATCH  /{id}  -> update_classroom (admin only)
/// DELETE /{id}  -> delete_classroom (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(classrooms::list_classrooms).post(classrooms::create_classroom),
        )
        .route(
            "/{id}",
            patch(classrooms::update_classroom).delete(classrooms::delete_classroom),
        )
}
