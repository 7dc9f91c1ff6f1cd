//! Classroom entity model and DTOs.

use hallpass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full classroom row from the `classrooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Classroom {
    pub id: DbId,
    pub name: String,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new classroom.
#[derive(Debug)]
pub struct CreateClassroom {
    pub name: String,
    pub capacity: i32,
}

/// DTO for updating an existing classroom. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateClassroom {
    pub name: Option<String>,
    pub capacity: Option<i32>,
}
