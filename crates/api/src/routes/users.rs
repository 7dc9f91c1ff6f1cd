//! Route definitions for the `/users` resource.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /          -> create_user (public signup / admin create)
/// GET    /          -> list_users (requires auth)
/// PUT    /settings  -> update_settings (self-service)
/// PATCH  /{id}      -> update_user (admin only)
/// DELETE /{id}      -> delete_user (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/settings", put(users::update_settings))
        .route(
            "/{id}",
            patch(users::update_user).delete(users::delete_user),
        )
}
