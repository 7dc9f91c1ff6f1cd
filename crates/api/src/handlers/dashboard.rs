//! Handlers for the admin dashboard.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use hallpass_db::repositories::{BookingRepo, ClassroomRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Aggregated counts for the admin dashboard header.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_classrooms: i64,
    pub total_bookings: i64,
    pub bookings_today: i64,
}

/// GET /api/v1/dashboard/stats
///
/// Totals for users, classrooms, and bookings, plus today's booking count.
/// Admin only.
pub async fn get_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DashboardStats>> {
    let total_users = UserRepo::count(&state.pool).await?;
    let total_classrooms = ClassroomRepo::count(&state.pool).await?;
    let total_bookings = BookingRepo::count(&state.pool).await?;
    let bookings_today = BookingRepo::count_on_date(&state.pool, Utc::now().date_naive()).await?;

    Ok(Json(DashboardStats {
        total_users,
        total_classrooms,
        total_bookings,
        bookings_today,
    }))
}
