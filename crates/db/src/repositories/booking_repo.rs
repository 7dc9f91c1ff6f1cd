//! Repository for the `bookings` table.
//!
//! Slot uniqueness is owned by the `uq_bookings_classroom_date_time`
//! constraint; [`BookingRepo::find_conflict`] exists for friendly pre-checks,
//! but the insert/update paths rely on the constraint as the authoritative
//! signal under concurrency.

use chrono::NaiveDate;
use hallpass_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{
    Booking, BookingWithDetails, CreateBooking, ScheduleFilter, UpdateBooking,
};

/// Column list for plain `bookings` queries.
const COLUMNS: &str = "id, user_id, classroom_id, date, time, created_at";

/// Column list for queries joined with classroom and user.
const DETAIL_COLUMNS: &str = "\
    b.id, b.user_id, b.classroom_id, b.date, b.time, b.created_at, \
    c.name AS classroom_name, c.capacity AS classroom_capacity, \
    u.name AS user_name, u.email AS user_email";

const DETAIL_JOINS: &str = "\
    FROM bookings b \
    JOIN classrooms c ON c.id = b.classroom_id \
    JOIN users u ON u.id = b.user_id";

/// Provides CRUD and schedule-query operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking, returning the created row.
    ///
    /// A double-booked slot surfaces as a 23505 violation on
    /// `uq_bookings_classroom_date_time`.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (user_id, classroom_id, date, time)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.user_id)
            .bind(input.classroom_id)
            .bind(input.date)
            .bind(&input.time)
            .fetch_one(pool)
            .await
    }

    /// Find a booking by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking joined with its classroom and user projection.
    pub async fn find_by_id_with_details(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingWithDetails>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE b.id = $1");
        sqlx::query_as::<_, BookingWithDetails>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the booking occupying `(classroom_id, date, time)`, if any.
    ///
    /// `exclude_id` skips a booking's own row when checking an update.
    pub async fn find_conflict(
        pool: &PgPool,
        classroom_id: DbId,
        date: NaiveDate,
        time: &str,
        exclude_id: Option<DbId>,
    ) -> Result<Option<DbId>, sqlx::Error> {
        match exclude_id {
            Some(own_id) => {
                sqlx::query_scalar::<_, DbId>(
                    "SELECT id FROM bookings
                     WHERE classroom_id = $1 AND date = $2 AND time = $3 AND id <> $4",
                )
                .bind(classroom_id)
                .bind(date)
                .bind(time)
                .bind(own_id)
                .fetch_optional(pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, DbId>(
                    "SELECT id FROM bookings
                     WHERE classroom_id = $1 AND date = $2 AND time = $3",
                )
                .bind(classroom_id)
                .bind(date)
                .bind(time)
                .fetch_optional(pool)
                .await
            }
        }
    }

    /// Move a booking to a new classroom/date/time.
    ///
    /// Returns `None` if no row with the given `id` exists. A collision with
    /// another booking surfaces as a 23505 violation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBooking,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET classroom_id = $2, date = $3, time = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(input.classroom_id)
            .bind(input.date)
            .bind(&input.time)
            .fetch_optional(pool)
            .await
    }

    /// Delete a booking. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List bookings matching the schedule filter, ascending by date
    /// (time and id as tiebreakers), joined with classroom and user.
    pub async fn list_schedule(
        pool: &PgPool,
        filter: &ScheduleFilter,
    ) -> Result<Vec<BookingWithDetails>, sqlx::Error> {
        let (where_clause, bind_values) = build_schedule_filter(filter);

        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} {where_clause} \
             ORDER BY b.date ASC, b.time ASC, b.id ASC"
        );

        let mut q = sqlx::query_as::<_, BookingWithDetails>(&query);
        for value in &bind_values {
            match value {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Date(v) => q = q.bind(*v),
            }
        }
        q.fetch_all(pool).await
    }

    /// Total number of bookings.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM bookings")
            .fetch_one(pool)
            .await
    }

    /// Number of bookings on a single calendar day.
    pub async fn count_on_date(pool: &PgPool, date: NaiveDate) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM bookings WHERE date = $1")
            .bind(date)
            .fetch_one(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for the dynamically-built schedule query.
enum BindValue {
    BigInt(DbId),
    Date(NaiveDate),
}

/// Build a WHERE clause and bind values from the schedule filter.
///
/// The clause is empty when no filter axis is active. DATE-typed columns make
/// the range inclusive of full calendar days without timestamp juggling.
fn build_schedule_filter(filter: &ScheduleFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(start) = filter.start_date {
        conditions.push(format!("b.date >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Date(start));
    }

    if let Some(end) = filter.end_date {
        conditions.push(format!("b.date <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Date(end));
    }

    if let Some(classroom_id) = filter.classroom_id {
        conditions.push(format!("b.classroom_id = ${bind_idx}"));
        bind_values.push(BindValue::BigInt(classroom_id));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}
