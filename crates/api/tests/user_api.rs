//! HTTP-level integration tests for the user directory: signup, listing,
//! admin management, and self-service settings.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_json, put_json_auth, seed_user,
    token_for, TEST_PASSWORD,
};
use hallpass_core::roles::{ROLE_ADMIN, ROLE_STAFF};
use hallpass_db::repositories::UserRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Public signup returns 201 and never echoes the password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_returns_201_without_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "New User",
        "email": "new@test.com",
        "password": "a-strong-password",
        "department": "Physics"
    });
    let response = post_json(app, "/api/v1/users", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "New User");
    assert_eq!(json["email"], "new@test.com");
    assert_eq!(json["role"], "Staff");
    assert_eq!(json["department"], "Physics");
    assert!(
        json.get("password").is_none() && json.get("password_hash").is_none(),
        "password material must never appear in responses"
    );
}

/// Signing up with an already-registered email fails with 400 and leaves
/// the original record unchanged.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_email_rejected(pool: PgPool) {
    let original = seed_user(&pool, "Original", "taken@test.com", ROLE_STAFF).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Impostor",
        "email": "taken@test.com",
        "password": "whatever-else"
    });
    let response = post_json(app, "/api/v1/users", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_EMAIL");

    // The original user record is unchanged.
    let unchanged = UserRepo::find_by_email(&pool, "taken@test.com")
        .await
        .unwrap()
        .expect("original user must still exist");
    assert_eq!(unchanged.id, original.id);
    assert_eq!(unchanged.name, "Original");
}

/// Malformed emails and short passwords are validation errors.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_validation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Bad Email",
        "email": "not-an-email",
        "password": "a-strong-password"
    });
    let response = post_json(app, "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Short PW",
        "email": "short@test.com",
        "password": "short"
    });
    let response = post_json(app, "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// Anonymous signups cannot grant themselves a role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_role_request_coerced_to_staff(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Sneaky",
        "email": "sneaky@test.com",
        "password": "a-strong-password",
        "role": "Admin"
    });
    let response = post_json(app, "/api/v1/users", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["role"], "Staff", "requested role must be ignored");
}

/// An authenticated Admin creating a user may set the role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_create_honors_role(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", "boss@test.com", ROLE_ADMIN).await;
    let token = token_for(admin.id, ROLE_ADMIN);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Dept Head",
        "email": "head@test.com",
        "password": "a-strong-password",
        "role": "Department Head"
    });
    let response =
        common::post_json_auth(app, "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["role"], "Department Head");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /users returns the directory projection for any authenticated user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users(pool: PgPool) {
    let user = seed_user(&pool, "Alice", "alice@test.com", ROLE_STAFF).await;
    seed_user(&pool, "Bob", "bob@test.com", ROLE_STAFF).await;
    let token = token_for(user.id, ROLE_STAFF);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().expect("response body should be an array");
    assert_eq!(users.len(), 2);
    for entry in users {
        assert!(entry["id"].is_number());
        assert!(entry["name"].is_string());
        assert!(entry["email"].is_string());
        assert!(entry["role"].is_string());
        assert!(entry.get("password_hash").is_none());
    }
}

// ---------------------------------------------------------------------------
// Admin management
// ---------------------------------------------------------------------------

/// Admin can update another user's profile; the change is logged.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_update_user(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", "boss@test.com", ROLE_ADMIN).await;
    let target = seed_user(&pool, "Target", "target@test.com", ROLE_STAFF).await;
    let token = token_for(admin.id, ROLE_ADMIN);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Renamed", "role": "Department Head" });
    let response =
        patch_json_auth(app, &format!("/api/v1/users/{}", target.id), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["role"], "Department Head");

    // The mutation is recorded in the activity feed.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/activities", &token).await;
    let feed = body_json(response).await;
    let latest = &feed.as_array().unwrap()[0];
    assert_eq!(latest["type"], "user");
    assert_eq!(latest["action"], "updated");
    assert_eq!(latest["details"], "Updated user Renamed");
}

/// A non-admin PATCHing another user is forbidden.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_admin_cannot_update_users(pool: PgPool) {
    let staff = seed_user(&pool, "Staffer", "staffer@test.com", ROLE_STAFF).await;
    let target = seed_user(&pool, "Target", "target@test.com", ROLE_STAFF).await;
    let token = token_for(staff.id, ROLE_STAFF);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Hacked" });
    let response =
        patch_json_auth(app, &format!("/api/v1/users/{}", target.id), body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Admin deletion removes the user; PATCHing it afterwards is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_delete_user(pool: PgPool) {
    let admin = seed_user(&pool, "Boss", "boss@test.com", ROLE_ADMIN).await;
    let target = seed_user(&pool, "Doomed", "doomed@test.com", ROLE_STAFF).await;
    let token = token_for(admin.id, ROLE_ADMIN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/users/{}", target.id), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Ghost" });
    let response =
        patch_json_auth(app, &format!("/api/v1/users/{}", target.id), body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Self-service settings
// ---------------------------------------------------------------------------

/// Name and email can change without supplying any password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_update_profile(pool: PgPool) {
    let user = seed_user(&pool, "Old Name", "old@test.com", ROLE_STAFF).await;
    let token = token_for(user.id, ROLE_STAFF);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "New Name", "email": "newaddr@test.com" });
    let response = put_json_auth(app, "/api/v1/users/settings", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "New Name");
    assert_eq!(json["email"], "newaddr@test.com");
}

/// A new password requires the current one to be present and correct.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_password_change_requires_current(pool: PgPool) {
    let user = seed_user(&pool, "Careful", "careful@test.com", ROLE_STAFF).await;
    let token = token_for(user.id, ROLE_STAFF);

    // Missing current password -> validation error.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "new_password": "another-strong-one" });
    let response = put_json_auth(app, "/api/v1/users/settings", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Wrong current password -> 401, password unchanged.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "current_password": "not-my-password",
        "new_password": "another-strong-one"
    });
    let response = put_json_auth(app, "/api/v1/users/settings", body, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct current password -> 200, and the new password logs in.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "current_password": TEST_PASSWORD,
        "new_password": "another-strong-one"
    });
    let response = put_json_auth(app, "/api/v1/users/settings", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "careful@test.com", "password": "another-strong-one" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}
