//! Route definitions for the `/booking` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/booking`.
///
/// ```text
/// POST   /      -> create_booking (requires auth; caller becomes owner)
/// GET    /{id}  -> get_booking (requires auth)
/// PATCH  /{id}  -> update_booking (owner or admin)
/// DELETE /{id}  -> delete_booking (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::create_booking))
        .route(
            "/{id}",
            get(bookings::get_booking)
                .patch(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
}
