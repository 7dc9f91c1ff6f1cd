//! Handlers for the `/activities` resource (audit-trail feed).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use hallpass_core::activity::{activity_types, actions};
use hallpass_core::error::CoreError;
use hallpass_core::types::{DbId, Timestamp};
use hallpass_db::models::activity::{ActivityWithUser, CreateActivity};
use hallpass_db::repositories::ActivityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Dashboard feed length when the client does not ask for one.
const DEFAULT_FEED_LIMIT: i64 = 10;

/// Upper bound on the feed length.
const MAX_FEED_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /activities`.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

/// Request body for `POST /activities`. The actor comes from the session.
#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub action: String,
    pub details: String,
}

/// Actor projection embedded in [`ActivityResponse`].
#[derive(Debug, Serialize)]
pub struct ActivityActor {
    pub name: String,
}

/// One feed entry, newest-first.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub id: DbId,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub action: String,
    pub user_id: Option<DbId>,
    pub details: String,
    pub timestamp: Timestamp,
    /// None once the acting account has been deleted.
    pub user: Option<ActivityActor>,
}

impl From<ActivityWithUser> for ActivityResponse {
    fn from(row: ActivityWithUser) -> Self {
        ActivityResponse {
            id: row.id,
            activity_type: row.activity_type,
            action: row.action,
            user_id: row.user_id,
            details: row.details,
            timestamp: row.timestamp,
            user: row.user_name.map(|name| ActivityActor { name }),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/activities?limit
///
/// The most recent entries, newest first. Defaults to the dashboard feed
/// window of 10.
pub async fn list_activities(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityResponse>>> {
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT);

    let rows = ActivityRepo::list_recent(&state.pool, limit).await?;
    let activities: Vec<ActivityResponse> = rows.into_iter().map(ActivityResponse::from).collect();
    Ok(Json(activities))
}

/// POST /api/v1/activities
///
/// Append an entry to the trail. The acting user is taken from the session;
/// type and action must come from the known vocabularies.
pub async fn create_activity(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<ActivityResponse>)> {
    let known_types = [
        activity_types::BOOKING,
        activity_types::USER,
        activity_types::CLASSROOM,
    ];
    if !known_types.contains(&input.activity_type.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown activity type: {}",
            input.activity_type
        ))));
    }

    let known_actions = [actions::CREATED, actions::UPDATED, actions::DELETED];
    if !known_actions.contains(&input.action.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown activity action: {}",
            input.action
        ))));
    }

    let created = ActivityRepo::create(
        &state.pool,
        &CreateActivity {
            activity_type: input.activity_type,
            action: input.action,
            user_id: Some(user.user_id),
            details: input.details,
        },
    )
    .await?;

    let row = ActivityRepo::find_by_id_with_user(&state.pool, created.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id: created.id,
        }))?;

    Ok((StatusCode::CREATED, Json(ActivityResponse::from(row))))
}
