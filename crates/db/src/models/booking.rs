//! Booking entity model and DTOs.

use chrono::NaiveDate;
use hallpass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full booking row from the `bookings` table.
///
/// `time` holds the canonical zero-padded slot label; the CHECK constraint
/// keeps it inside the fixed slot set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub classroom_id: DbId,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: Timestamp,
}

/// Booking row joined with its classroom and a safe user projection.
///
/// Flat on purpose: sqlx maps the joined columns directly, and the API
/// layer nests them into its response shape.
#[derive(Debug, Clone, FromRow)]
pub struct BookingWithDetails {
    pub id: DbId,
    pub user_id: DbId,
    pub classroom_id: DbId,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: Timestamp,
    pub classroom_name: String,
    pub classroom_capacity: i32,
    pub user_name: String,
    pub user_email: String,
}

/// DTO for creating a new booking.
#[derive(Debug)]
pub struct CreateBooking {
    pub user_id: DbId,
    pub classroom_id: DbId,
    pub date: NaiveDate,
    pub time: String,
}

/// DTO for rescheduling a booking. All three coordinates are required.
#[derive(Debug)]
pub struct UpdateBooking {
    pub classroom_id: DbId,
    pub date: NaiveDate,
    pub time: String,
}

/// Filter parameters for schedule listing. Every axis is optional.
#[derive(Debug, Default)]
pub struct ScheduleFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub classroom_id: Option<DbId>,
}
