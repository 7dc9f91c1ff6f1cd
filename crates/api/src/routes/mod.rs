pub mod activities;
pub mod auth;
pub mod booking;
pub mod classrooms;
pub mod dashboard;
pub mod health;
pub mod schedule;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                    login (public)
/// /auth/refresh                  refresh (public)
/// /auth/logout                   logout (requires auth)
///
/// /users                         create (public signup), list (auth)
/// /users/settings                self-service settings (PUT, auth)
/// /users/{id}                    update, delete (admin only)
///
/// /classrooms                    list (auth), create (admin)
/// /classrooms/{id}               update, delete (admin)
///
/// /booking                       create (auth)
/// /booking/{id}                  get, update, delete (owner or admin)
///
/// /schedule                      filtered booking listing (auth)
/// /schedule/week                 week grid for the acting user (auth)
///
/// /activities                    feed (auth), append (auth)
///
/// /dashboard/stats               aggregate counts (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/classrooms", classrooms::router())
        .nest("/booking", booking::router())
        .nest("/schedule", schedule::router())
        .nest("/activities", activities::router())
        .nest("/dashboard", dashboard::router())
}
