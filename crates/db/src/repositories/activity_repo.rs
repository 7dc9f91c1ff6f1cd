//! Repository for the `activities` table. Append-only.

use hallpass_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, ActivityWithUser, CreateActivity};

const COLUMNS: &str = "id, activity_type, action, user_id, details, timestamp";

/// Column list for queries joined with the actor's name.
const USER_COLUMNS: &str = "\
    a.id, a.activity_type, a.action, a.user_id, a.details, a.timestamp, \
    u.name AS user_name";

/// Provides append and feed-query operations for the activity log.
///
/// There is deliberately no update or delete: the trail is immutable.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an entry. The timestamp is server-assigned.
    pub async fn create(pool: &PgPool, input: &CreateActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (activity_type, action, user_id, details)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&input.activity_type)
            .bind(&input.action)
            .bind(input.user_id)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by ID, joined with the actor's current name.
    pub async fn find_by_id_with_user(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ActivityWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM activities a
             LEFT JOIN users u ON u.id = a.user_id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, ActivityWithUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recent entries, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ActivityWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM activities a
             LEFT JOIN users u ON u.id = a.user_id
             ORDER BY a.timestamp DESC, a.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, ActivityWithUser>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
