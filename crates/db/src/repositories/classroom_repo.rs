//! Repository for the `classrooms` table.

use hallpass_core::types::DbId;
use sqlx::PgPool;

use crate::models::classroom::{Classroom, CreateClassroom, UpdateClassroom};

const COLUMNS: &str = "id, name, capacity, created_at, updated_at";

/// Provides CRUD operations for classrooms.
pub struct ClassroomRepo;

impl ClassroomRepo {
    /// Insert a new classroom, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClassroom) -> Result<Classroom, sqlx::Error> {
        let query = format!(
            "INSERT INTO classrooms (name, capacity)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Classroom>(&query)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    /// Find a classroom by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Classroom>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classrooms WHERE id = $1");
        sqlx::query_as::<_, Classroom>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all classrooms ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Classroom>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classrooms ORDER BY name ASC");
        sqlx::query_as::<_, Classroom>(&query).fetch_all(pool).await
    }

    /// Update a classroom. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClassroom,
    ) -> Result<Option<Classroom>, sqlx::Error> {
        let query = format!(
            "UPDATE classrooms SET
                name = COALESCE($2, name),
                capacity = COALESCE($3, capacity),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Classroom>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a classroom. Its bookings cascade.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM classrooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of classrooms.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM classrooms")
            .fetch_one(pool)
            .await
    }
}
