//! Handlers for the `/classrooms` resource.
//!
//! Reads require authentication; every mutation requires the Admin role,
//! enforced by [`RequireAdmin`] on each write handler.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use hallpass_core::activity::{activity_types, actions, classroom_updated_details};
use hallpass_core::error::CoreError;
use hallpass_core::types::DbId;
use hallpass_db::models::activity::CreateActivity;
use hallpass_db::models::classroom::{Classroom, CreateClassroom, UpdateClassroom};
use hallpass_db::repositories::{ActivityRepo, ClassroomRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /classrooms`.
#[derive(Debug, Deserialize)]
pub struct CreateClassroomRequest {
    pub name: String,
    pub capacity: i32,
}

/// Request body for `PATCH /classrooms/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateClassroomRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Classroom name must not be empty".into(),
        )));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> AppResult<()> {
    if capacity <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Capacity must be a positive integer".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/classrooms
///
/// List all classrooms ordered by name.
pub async fn list_classrooms(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<Classroom>>> {
    let classrooms = ClassroomRepo::list(&state.pool).await?;
    Ok(Json(classrooms))
}

/// POST /api/v1/classrooms
///
/// Create a classroom. Admin only.
pub async fn create_classroom(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateClassroomRequest>,
) -> AppResult<(StatusCode, Json<Classroom>)> {
    validate_name(&input.name)?;
    validate_capacity(input.capacity)?;

    let classroom = ClassroomRepo::create(
        &state.pool,
        &CreateClassroom {
            name: input.name,
            capacity: input.capacity,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(classroom)))
}

/// PATCH /api/v1/classrooms/{id}
///
/// Update a classroom's name and/or capacity. Admin only.
pub async fn update_classroom(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClassroomRequest>,
) -> AppResult<Json<Classroom>> {
    if let Some(ref name) = input.name {
        validate_name(name)?;
    }
    if let Some(capacity) = input.capacity {
        validate_capacity(capacity)?;
    }

    let classroom = ClassroomRepo::update(
        &state.pool,
        id,
        &UpdateClassroom {
            name: input.name,
            capacity: input.capacity,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Classroom",
        id,
    }))?;

    ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            activity_type: activity_types::CLASSROOM.into(),
            action: actions::UPDATED.into(),
            user_id: Some(admin.user_id),
            details: classroom_updated_details(&classroom.name),
        },
    )
    .await?;

    Ok(Json(classroom))
}

/// DELETE /api/v1/classrooms/{id}
///
/// Delete a classroom and (by cascade) its bookings. Admin only.
pub async fn delete_classroom(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ClassroomRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Classroom",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
