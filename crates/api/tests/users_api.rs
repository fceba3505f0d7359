//! Integration tests for `/api/auth/user`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, session_token};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_without_parameters_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/user").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Email or Supabase ID required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_unknown_user_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/user?email=nobody@example.com").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_find_by_either_key(pool: PgPool) {
    let body = json!({
        "email": "new@example.com",
        "name": "New Person",
        "supabaseId": "provider-42",
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/auth/user", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User created successfully");
    assert_eq!(json["user"]["role"], "CUSTOMER");
    assert_eq!(json["user"]["supabaseId"], "provider-42");

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/auth/user?supabaseId=provider-42",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["email"], "new@example.com");

    let response = get(
        common::build_test_app(pool),
        "/api/auth/user?email=new@example.com",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creating_existing_user_returns_it(pool: PgPool) {
    let existing = common::create_user(&pool, "taken@example.com", "CONTRIBUTOR").await;

    let body = json!({
        "email": "taken@example.com",
        "supabaseId": "a-different-provider-id",
        "role": "CUSTOMER",
    });
    let response = post_json(common::build_test_app(pool), "/api/auth/user", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User already exists");
    assert_eq!(json["user"]["id"], existing.id);
    assert_eq!(json["user"]["role"], "CONTRIBUTOR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_email_is_rejected(pool: PgPool) {
    let body = json!({ "email": "not-an-email", "supabaseId": "x" });
    let response = post_json(common::build_test_app(pool), "/api/auth/user", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contributor_role_is_self_selectable(pool: PgPool) {
    let body = json!({
        "email": "maker@example.com",
        "supabaseId": "maker-sub",
        "role": "CONTRIBUTOR",
    });
    let response = post_json(common::build_test_app(pool), "/api/auth/user", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["role"], "CONTRIBUTOR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_admin_signup_is_refused(pool: PgPool) {
    let body = json!({
        "email": "intruder@example.com",
        "supabaseId": "intruder-sub",
        "role": "ADMIN",
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/auth/user", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/auth/user?supabaseId=intruder-sub",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A token for the would-be account resolves to no user at all.
    let token = session_token("intruder-sub");
    let response = get_auth(common::build_test_app(pool), "/api/admin/stats", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_admin_session_cannot_create_admin(pool: PgPool) {
    let contributor = common::create_user(&pool, "maker@example.com", "CONTRIBUTOR").await;
    let token = session_token(contributor.supabase_id.as_deref().unwrap());

    let body = json!({
        "email": "second@example.com",
        "supabaseId": "second-sub",
        "role": "ADMIN",
    });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/auth/user", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_session_can_create_admin(pool: PgPool) {
    let admin = common::create_user(&pool, "boss@example.com", "ADMIN").await;
    let token = session_token(admin.supabase_id.as_deref().unwrap());

    let body = json!({
        "email": "deputy@example.com",
        "supabaseId": "deputy-sub",
        "role": "ADMIN",
    });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/auth/user", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User created successfully");
    assert_eq!(json["user"]["role"], "ADMIN");
}
