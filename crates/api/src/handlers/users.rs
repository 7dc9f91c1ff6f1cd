//! Handlers for the `/users` resource.
//!
//! Signup is public; everything else requires authentication, and directory
//! writes (other than self-service settings) require the Admin role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::ValidateEmail;

use hallpass_core::activity::{activity_types, actions, user_deleted_details, user_updated_details};
use hallpass_core::error::CoreError;
use hallpass_core::roles::{is_known_role, ROLE_STAFF};
use hallpass_core::types::DbId;
use hallpass_db::models::activity::CreateActivity;
use hallpass_db::models::user::{CreateUser, UpdateUser, UserResponse};
use hallpass_db::repositories::{ActivityRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Minimum password length enforced on signup and password changes.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Honored only when the caller is an authenticated Admin.
    pub role: Option<String>,
    pub department: Option<String>,
}

/// Request body for `PATCH /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
}

/// Request body for `PUT /users/settings`.
#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Must be supplied and correct whenever `new_password` is set.
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Create a user (public signup or admin-create). Role requests from
/// non-admin callers are coerced to Staff; the email must be unused.
pub async fn create_user(
    State(state): State<AppState>,
    MaybeAuthUser(actor): MaybeAuthUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    if !input.email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid email address".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = match (&actor, input.role) {
        (Some(actor), Some(requested)) if actor.is_admin() => {
            if !is_known_role(&requested) {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Unknown role: {requested}"
                ))));
            }
            requested
        }
        _ => ROLE_STAFF.to_string(),
    };

    // Friendly pre-check; uq_users_email still catches concurrent signups.
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::DuplicateEmail(
            "User with this email already exists".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        name: input.name,
        email: input.email,
        password_hash: hashed,
        role,
        department: input.department,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/v1/users
///
/// List all users. Password hashes never leave the repository layer.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}

/// PATCH /api/v1/users/{id}
///
/// Update a user's profile fields (not password). Admin only.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(ref email) = input.email {
        if !email.validate_email() {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid email address".into(),
            )));
        }
    }
    if let Some(ref role) = input.role {
        if !is_known_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role: {role}"
            ))));
        }
    }

    let update_dto = UpdateUser {
        name: input.name,
        email: input.email,
        role: input.role,
        department: input.department,
    };
    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            activity_type: activity_types::USER.into(),
            action: actions::UPDATED.into(),
            user_id: Some(admin.user_id),
            details: user_updated_details(&user.name),
        },
    )
    .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/users/{id}
///
/// Hard-delete a user. Their bookings cascade; activity entries keep a
/// null actor. Admin only.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    UserRepo::delete(&state.pool, id).await?;

    // An admin removing their own account has no surviving actor row.
    let actor = (admin.user_id != id).then_some(admin.user_id);
    ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            activity_type: activity_types::USER.into(),
            action: actions::DELETED.into(),
            user_id: actor,
            details: user_deleted_details(&user.name),
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/users/settings
///
/// Self-service profile update. A new password is applied only after the
/// supplied current password verifies against the stored hash.
pub async fn update_settings(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SettingsRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if let Some(ref new_password) = input.new_password {
        let current = input.current_password.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Current password is required to set a new password".into(),
            ))
        })?;

        let current_valid = verify_password(current, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !current_valid {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Current password is incorrect".into(),
            )));
        }

        validate_password_strength(new_password, MIN_PASSWORD_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

        let hashed = hash_password(new_password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        UserRepo::update_password(&state.pool, user.id, &hashed).await?;
    }

    if let Some(ref email) = input.email {
        if !email.validate_email() {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid email address".into(),
            )));
        }
    }

    let update_dto = UpdateUser {
        name: input.name,
        email: input.email,
        role: None,
        department: None,
    };
    let updated = UserRepo::update(&state.pool, user.id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.id,
        }))?;

    Ok(Json(UserResponse::from(&updated)))
}
