//! Handlers for the `/booking` resource.
//!
//! The no-double-booking invariant lives in two places: a friendly pre-check
//! here, and the `uq_bookings_classroom_date_time` constraint that settles
//! concurrent races (the error layer rewrites the violation to a conflict).
//! Ownership rules: a booking belongs to the user who created it; only the
//! owner or an Admin may reschedule or cancel it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use hallpass_core::activity::{
    activity_types, actions, booking_created_details, booking_deleted_details,
    booking_updated_details,
};
use hallpass_core::error::CoreError;
use hallpass_core::timeslot::TimeSlot;
use hallpass_core::types::{DbId, Timestamp};
use hallpass_db::models::activity::CreateActivity;
use hallpass_db::models::booking::{BookingWithDetails, CreateBooking, UpdateBooking};
use hallpass_db::repositories::{ActivityRepo, BookingRepo, ClassroomRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /booking`.
///
/// The booking's owner is the authenticated caller; a client-supplied user
/// id would not be trusted and is therefore not accepted at all.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub classroom_id: DbId,
    pub date: NaiveDate,
    pub time: String,
}

/// Request body for `PATCH /booking/{id}`. All three coordinates are
/// required; a reschedule always states the full target slot.
#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub classroom_id: DbId,
    pub date: NaiveDate,
    pub time: String,
}

/// Classroom projection embedded in [`BookingResponse`].
#[derive(Debug, Serialize)]
pub struct ClassroomInfo {
    pub id: DbId,
    pub name: String,
    pub capacity: i32,
}

/// User projection embedded in [`BookingResponse`]: id, name, email only.
#[derive(Debug, Serialize)]
pub struct BookingUserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// A booking joined with its classroom and owner projection.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: DbId,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: Timestamp,
    pub classroom: ClassroomInfo,
    pub user: BookingUserInfo,
}

impl From<BookingWithDetails> for BookingResponse {
    fn from(row: BookingWithDetails) -> Self {
        BookingResponse {
            id: row.id,
            date: row.date,
            time: row.time,
            created_at: row.created_at,
            classroom: ClassroomInfo {
                id: row.classroom_id,
                name: row.classroom_name,
                capacity: row.classroom_capacity,
            },
            user: BookingUserInfo {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_slot(time: &str) -> AppResult<TimeSlot> {
    TimeSlot::parse(time).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Invalid time slot: {time}")))
    })
}

/// Past slots are viewable but never a valid booking target.
fn ensure_slot_not_past(date: NaiveDate, slot: TimeSlot) -> AppResult<()> {
    if slot.is_past(date, Utc::now().naive_utc()) {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot book a time slot in the past".into(),
        )));
    }
    Ok(())
}

async fn ensure_no_conflict(
    state: &AppState,
    classroom_id: DbId,
    date: NaiveDate,
    slot: TimeSlot,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    let conflict =
        BookingRepo::find_conflict(&state.pool, classroom_id, date, slot.as_str(), exclude_id)
            .await?;
    if conflict.is_some() {
        return Err(AppError::Core(CoreError::SlotConflict(
            "Time slot already booked".into(),
        )));
    }
    Ok(())
}

async fn booking_response(state: &AppState, id: DbId) -> AppResult<BookingResponse> {
    let details = BookingRepo::find_by_id_with_details(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    Ok(BookingResponse::from(details))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/booking
///
/// Reserve a classroom for one date + slot. The acting user becomes the
/// owner. Rejects unknown classrooms, past slots, and occupied slots.
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let slot = parse_slot(&input.time)?;
    ensure_slot_not_past(input.date, slot)?;

    let classroom = ClassroomRepo::find_by_id(&state.pool, input.classroom_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Classroom",
            id: input.classroom_id,
        }))?;

    ensure_no_conflict(&state, classroom.id, input.date, slot, None).await?;

    let booking = BookingRepo::create(
        &state.pool,
        &CreateBooking {
            user_id: user.user_id,
            classroom_id: classroom.id,
            date: input.date,
            time: slot.as_str().to_string(),
        },
    )
    .await?;

    ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            activity_type: activity_types::BOOKING.into(),
            action: actions::CREATED.into(),
            user_id: Some(user.user_id),
            details: booking_created_details(&classroom.name, input.date, slot),
        },
    )
    .await?;

    let response = booking_response(&state, booking.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/booking/{id}
///
/// Fetch one booking joined with its classroom and owner projection.
pub async fn get_booking(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<BookingResponse>> {
    let response = booking_response(&state, id).await?;
    Ok(Json(response))
}

/// PATCH /api/v1/booking/{id}
///
/// Reschedule a booking. Owner or Admin only. The conflict check excludes
/// the booking's own row, so re-submitting the unchanged slot succeeds.
pub async fn update_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let existing = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    if !user.is_admin() && existing.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to edit this booking".into(),
        )));
    }

    let slot = parse_slot(&input.time)?;
    ensure_slot_not_past(input.date, slot)?;

    let classroom = ClassroomRepo::find_by_id(&state.pool, input.classroom_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Classroom",
            id: input.classroom_id,
        }))?;

    ensure_no_conflict(&state, classroom.id, input.date, slot, Some(id)).await?;

    BookingRepo::update(
        &state.pool,
        id,
        &UpdateBooking {
            classroom_id: classroom.id,
            date: input.date,
            time: slot.as_str().to_string(),
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Booking",
        id,
    }))?;

    let admin_override = user.is_admin() && existing.user_id != user.user_id;
    ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            activity_type: activity_types::BOOKING.into(),
            action: actions::UPDATED.into(),
            user_id: Some(user.user_id),
            details: booking_updated_details(&classroom.name, input.date, slot, admin_override),
        },
    )
    .await?;

    let response = booking_response(&state, id).await?;
    Ok(Json(response))
}

/// DELETE /api/v1/booking/{id}
///
/// Cancel a booking. Owner or Admin only. Returns 204 No Content.
pub async fn delete_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = BookingRepo::find_by_id_with_details(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    if !user.is_admin() && existing.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to delete this booking".into(),
        )));
    }

    BookingRepo::delete(&state.pool, id).await?;

    let admin_override = user.is_admin() && existing.user_id != user.user_id;
    ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            activity_type: activity_types::BOOKING.into(),
            action: actions::DELETED.into(),
            user_id: Some(user.user_id),
            details: booking_deleted_details(&existing.classroom_name, admin_override),
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
