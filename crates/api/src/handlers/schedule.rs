//! Handlers for the `/schedule` resource: filtered booking listings and the
//! server-rendered week grid.
//!
//! Query parameters keep the original client's camelCase names
//! (`startDate`, `endDate`, `classroomId`).

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hallpass_core::error::CoreError;
use hallpass_core::schedule::{can_go_to_previous_week, BookingSlot, DayCells, WeekGrid};
use hallpass_core::timeslot::TimeSlot;
use hallpass_core::types::DbId;
use hallpass_db::models::booking::ScheduleFilter;
use hallpass_db::repositories::{BookingRepo, ClassroomRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::bookings::BookingResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /schedule`. Every axis is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub classroom_id: Option<DbId>,
}

/// Query parameters for `GET /schedule/week`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    pub classroom_id: DbId,
    /// First day of the 7-day window; defaults to today.
    pub week_start: Option<NaiveDate>,
}

/// The week grid as seen by the acting user.
#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub week_start: NaiveDate,
    /// Whether the window may move one week earlier without preceding today.
    pub can_go_previous: bool,
    pub days: Vec<DayCells>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/schedule?startDate&endDate&classroomId
///
/// Bookings in date order (full-day inclusive range), each joined with its
/// classroom and a {id, name, email} user projection.
pub async fn list_schedule(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let filter = ScheduleFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        classroom_id: query.classroom_id,
    };

    let rows = BookingRepo::list_schedule(&state.pool, &filter).await?;
    let bookings: Vec<BookingResponse> = rows.into_iter().map(BookingResponse::from).collect();
    Ok(Json(bookings))
}

/// GET /api/v1/schedule/week?classroomId&weekStart
///
/// Classify every (day, slot) cell of the 7-day window for the acting user:
/// past, booked-by-other, booked-by-self, or free.
pub async fn week_view(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeekResponse>> {
    let classroom = ClassroomRepo::find_by_id(&state.pool, query.classroom_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Classroom",
            id: query.classroom_id,
        }))?;

    let today = Utc::now().date_naive();
    let week_start = query.week_start.unwrap_or(today);
    let week_end = week_start + Days::new(6);

    let filter = ScheduleFilter {
        start_date: Some(week_start),
        end_date: Some(week_end),
        classroom_id: Some(classroom.id),
    };
    let rows = BookingRepo::list_schedule(&state.pool, &filter).await?;

    // The CHECK constraint keeps stored labels inside the slot set, so the
    // parse only drops rows if the schema and core ever disagree.
    let slots: Vec<BookingSlot> = rows
        .iter()
        .filter_map(|row| {
            TimeSlot::parse(&row.time).map(|slot| BookingSlot {
                booking_id: row.id,
                owner_id: row.user_id,
                date: row.date,
                slot,
            })
        })
        .collect();

    let grid = WeekGrid::build(
        week_start,
        &slots,
        user.user_id,
        None,
        Utc::now().naive_utc(),
    );

    Ok(Json(WeekResponse {
        week_start: grid.week_start,
        can_go_previous: can_go_to_previous_week(week_start, today),
        days: grid.days,
    }))
}
