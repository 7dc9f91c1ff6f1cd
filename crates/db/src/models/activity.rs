//! Activity entity model and DTOs.

use hallpass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full activity row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub action: String,
    /// Acting user; None once the account has been deleted.
    pub user_id: Option<DbId>,
    pub details: String,
    pub timestamp: Timestamp,
}

/// Activity row joined with the actor's current name.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityWithUser {
    pub id: DbId,
    pub activity_type: String,
    pub action: String,
    pub user_id: Option<DbId>,
    pub details: String,
    pub timestamp: Timestamp,
    pub user_name: Option<String>,
}

/// DTO for appending an activity entry.
#[derive(Debug)]
pub struct CreateActivity {
    pub activity_type: String,
    pub action: String,
    pub user_id: Option<DbId>,
    pub details: String,
}
