//! Integration tests for the page gate, session handling, role checks, the
//! admin approval workflow, payouts and the user dashboard.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_auth, post_json, post_json_auth, session_token};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Page gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_pages_redirect_to_signin(pool: PgPool) {
    for (path, location) in [
        ("/dashboard", "/auth/signin?redirect=%2Fdashboard"),
        ("/admin/approvals", "/auth/signin?redirect=%2Fadmin%2Fapprovals"),
        ("/upload", "/auth/signin?redirect=%2Fupload"),
    ] {
        let response = get(common::build_test_app(pool.clone()), path).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(response.headers()["location"].to_str().unwrap(), location);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_session_cookie_still_passes_the_gate(pool: PgPool) {
    let request = Request::builder()
        .uri("/upload")
        .header("cookie", "sb-access-token=")
        .body(Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quoted_session_cookie_authenticates(pool: PgPool) {
    let user = common::create_user(&pool, "buyer@example.com", "CUSTOMER").await;
    let token = session_token(user.supabase_id.as_deref().unwrap());

    let request = Request::builder()
        .uri("/api/dashboard")
        .header("cookie", format!("theme=dark; sb-access-token=\"{token}\""))
        .body(Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["userId"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_cookie_passes_the_gate(pool: PgPool) {
    let request = Request::builder()
        .uri("/dashboard")
        .header("cookie", "sb-project-access-token=anything")
        .body(Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool.clone()), request).await;
    // No static pages are configured in tests, so the page itself is missing.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(common::build_test_app(pool), "/uploads-gallery").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Sessions and roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_enforce_roles(pool: PgPool) {
    let customer = common::create_user(&pool, "buyer@example.com", "CUSTOMER").await;
    let admin = common::create_user(&pool, "boss@example.com", "ADMIN").await;

    let response = get(common::build_test_app(pool.clone()), "/api/admin/stats").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/admin/stats",
        "garbage-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = session_token(customer.supabase_id.as_deref().unwrap());
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/admin/stats", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let token = session_token(admin.supabase_id.as_deref().unwrap());
    let response = get_auth(common::build_test_app(pool), "/api/admin/stats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["totalUsers"], 2);
    assert_eq!(json["totalCustomers"], 1);
    assert_eq!(json["totalRevenue"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_cookie_authenticates_api_calls(pool: PgPool) {
    let user = common::create_user(&pool, "buyer@example.com", "CUSTOMER").await;
    let token = session_token(user.supabase_id.as_deref().unwrap());

    let request = Request::builder()
        .uri("/api/dashboard")
        .header("cookie", format!("sb-access-token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool.clone()), request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["userId"], user.id);
    assert_eq!(json["role"], "CUSTOMER");

    let mut config = common::test_config();
    config.identity.jwt_secret = None;
    let app = common::build_test_app_with(pool, config);
    let response = get_auth(app, "/api/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_user_list_is_paginated(pool: PgPool) {
    let admin = common::create_user(&pool, "boss@example.com", "ADMIN").await;
    common::create_user(&pool, "maker@example.com", "CONTRIBUTOR").await;
    let newest = common::create_user(&pool, "buyer@example.com", "CUSTOMER").await;
    let token = session_token(admin.supabase_id.as_deref().unwrap());

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/admin/users?page=1&limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["users"].as_array().unwrap().len(), 2);
    assert_eq!(json["users"][0]["id"], newest.id);
    assert_eq!(
        json["pagination"],
        json!({ "page": 1, "limit": 2, "total": 3, "pages": 2 })
    );

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/admin/users?page=2&limit=2", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["users"].as_array().unwrap().len(), 1);
    assert_eq!(json["users"][0]["id"], admin.id);
    assert_eq!(json["pagination"]["page"], 2);
}

// ---------------------------------------------------------------------------
// Purchases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_purchase_shows_up_after_sign_up(pool: PgPool) {
    let owner = common::create_user(&pool, "maker@example.com", "CONTRIBUTOR").await;
    let asset = common::create_asset(&pool, owner.id, "bought", 2000, true).await;

    let mut order_ids = Vec::new();
    for _ in 0..2 {
        let body = json!({
            "items": [{ "mediaAssetId": asset.id, "quantity": 1 }],
            "customerEmail": "guest@example.com",
        });
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/checkout/create", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        order_ids.push(body_json(response).await["order"]["id"].as_i64().unwrap());
    }

    // Only the first order is paid for.
    let body = json!({ "orderId": order_ids[0] });
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/checkout/confirm", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let buyer = common::create_user(&pool, "guest@example.com", "CUSTOMER").await;
    let token = session_token(buyer.supabase_id.as_deref().unwrap());

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/dashboard/purchases", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let orders = json["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], order_ids[0]);
    assert_eq!(orders[0]["status"], "COMPLETED");
    assert_eq!(orders[0]["items"][0]["mediaAsset"]["id"], asset.id);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/dashboard", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["purchases"], 1);
    assert_eq!(json["totalSpent"], 2000);

    let owner_token = session_token(owner.supabase_id.as_deref().unwrap());
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/dashboard/purchases", &owner_token).await;
    assert_eq!(body_json(response).await["orders"], json!([]));
}

// ---------------------------------------------------------------------------
// Approval workflow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_lists_then_publishes_asset(pool: PgPool) {
    let admin = common::create_user(&pool, "boss@example.com", "ADMIN").await;
    let owner = common::create_user(&pool, "maker@example.com", "CONTRIBUTOR").await;
    let pending = common::create_asset(&pool, owner.id, "awaiting", 1500, false).await;
    let doomed = common::create_asset(&pool, owner.id, "doomed", 1500, false).await;
    let token = session_token(admin.supabase_id.as_deref().unwrap());

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/admin/approvals", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 2);
    assert_eq!(json["approvals"][0]["id"], pending.id);
    assert_eq!(json["approvals"][0]["contributor"], "CONTRIBUTOR user");

    let uri = format!("/api/admin/media/{}/approve", pending.id);
    let response =
        post_json_auth(common::build_test_app(pool.clone()), &uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["mediaAsset"]["isApproved"], true);

    let uri = format!("/api/admin/media/{}/reject", doomed.id);
    let response =
        post_json_auth(common::build_test_app(pool.clone()), &uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["mediaAsset"]["isActive"], false);

    let response = get(common::build_test_app(pool.clone()), "/api/media").await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["mediaAssets"][0]["id"], pending.id);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/admin/approvals", &token).await;
    assert_eq!(body_json(response).await["pagination"]["total"], 0);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/admin/media/999999/approve",
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Payouts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn payout_lifecycle(pool: PgPool) {
    let admin = common::create_user(&pool, "boss@example.com", "ADMIN").await;
    let owner = common::create_user(&pool, "maker@example.com", "CONTRIBUTOR").await;
    let customer = common::create_user(&pool, "buyer@example.com", "CUSTOMER").await;
    let token = session_token(admin.supabase_id.as_deref().unwrap());

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/admin/payouts",
        json!({ "userId": customer.id, "amount": 1000 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/admin/payouts",
        json!({ "userId": owner.id, "amount": 0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/admin/payouts",
        json!({
            "userId": owner.id,
            "amount": 1500,
            "paymentMethod": "bank_transfer",
            "accountDetails": { "iban": "XX00TEST" },
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["payout"]["status"], "PENDING");
    let payout_id = json["payout"]["id"].as_i64().unwrap();

    let uri = format!("/api/admin/payouts/{payout_id}/complete");
    let response =
        post_json_auth(common::build_test_app(pool.clone()), &uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["payout"]["status"], "COMPLETED");
    assert!(json["payout"]["processedAt"].is_string());

    let response =
        post_json_auth(common::build_test_app(pool.clone()), &uri, json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let owner_token = session_token(owner.supabase_id.as_deref().unwrap());
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/dashboard/payouts", &owner_token).await;
    assert_eq!(body_json(response).await["payouts"][0]["amount"], 1500);

    let response = get_auth(common::build_test_app(pool), "/api/dashboard", &owner_token).await;
    let json = body_json(response).await;
    assert_eq!(json["paidOut"], 1500);
    assert_eq!(json["totalEarnings"], 0);
}
