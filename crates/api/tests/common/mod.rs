#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;

use stockmedia_api::auth::jwt::JwtConfig;
use stockmedia_api::auth::session::{SessionClaims, SESSION_AUDIENCE};
use stockmedia_api::config::{CdnConfig, IdentityConfig, PaymentConfig, ServerConfig};
use stockmedia_api::router::build_app_router;
use stockmedia_api::state::AppState;
use stockmedia_core::cdn::SignatureAlgorithm;
use stockmedia_core::payments::SimulatedGateway;
use stockmedia_core::types::DbId;
use stockmedia_db::models::media_asset::{CreateMediaAsset, MediaAsset};
use stockmedia_db::models::user::{CreateUser, User};
use stockmedia_db::repositories::{MediaAssetRepo, UserRepo};

pub const TEST_SESSION_SECRET: &str = "test-identity-provider-secret";
pub const TEST_DOWNLOAD_SECRET: &str = "test-download-secret-long-enough-for-hmac";
pub const TEST_WEBHOOK_KEY: &str = "test-webhook-signature-key";
pub const TEST_CLOUD_NAME: &str = "demo-cloud";

/// Build a test `ServerConfig` with every vendor credential filled in.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        app_env: "test".to_string(),
        static_dir: None,
        jwt: JwtConfig {
            secret: TEST_DOWNLOAD_SECRET.to_string(),
        },
        identity: IdentityConfig {
            url: Some("http://localhost:54321".to_string()),
            anon_key: Some("anon".to_string()),
            service_role_key: None,
            jwt_secret: Some(TEST_SESSION_SECRET.to_string()),
        },
        cdn: CdnConfig {
            cloud_name: Some(TEST_CLOUD_NAME.to_string()),
            api_key: Some("123456".to_string()),
            api_secret: Some("cdn-secret".to_string()),
            upload_preset: None,
            signature_algorithm: SignatureAlgorithm::Sha1,
        },
        payments: PaymentConfig {
            signature_key: Some(TEST_WEBHOOK_KEY.to_string()),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the default test configuration.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (page gate, CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway: Arc::new(SimulatedGateway),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Mint an identity provider access token for `supabase_id`.
pub fn session_token(supabase_id: &str) -> String {
    let claims = SessionClaims {
        sub: supabase_id.to_string(),
        email: None,
        aud: SESSION_AUDIENCE.to_string(),
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SESSION_SECRET.as_bytes()),
    )
    .expect("session token should encode")
}

/// Insert a user with the given role. The provider id is `sub-<email>`.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        name: Some(format!("{role} user")),
        supabase_id: format!("sub-{email}"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Insert an image asset owned by `user_id`, optionally approving it.
pub async fn create_asset(
    pool: &PgPool,
    user_id: DbId,
    cloudinary_id: &str,
    price: i64,
    approved: bool,
) -> MediaAsset {
    let input = CreateMediaAsset {
        title: format!("Asset {cloudinary_id}"),
        description: Some("Integration test asset".to_string()),
        media_type: "IMAGE".to_string(),
        tags: vec!["test".to_string()],
        category: Some("nature".to_string()),
        cloudinary_id: cloudinary_id.to_string(),
        original_url: format!("https://cdn.test/{cloudinary_id}.jpg"),
        thumbnail_url: format!("https://cdn.test/t/{cloudinary_id}.jpg"),
        preview_url: format!("https://cdn.test/p/{cloudinary_id}.jpg"),
        watermarked_url: None,
        width: Some(1920),
        height: Some(1080),
        duration: None,
        file_size: Some(1_000_000),
        format: Some("jpg".to_string()),
        price,
        license_type: "STANDARD".to_string(),
        user_id,
    };
    let asset = MediaAssetRepo::create(pool, &input)
        .await
        .expect("asset creation should succeed");
    if !approved {
        return asset;
    }
    MediaAssetRepo::approve(pool, asset.id)
        .await
        .expect("approval should succeed")
        .expect("asset should exist")
}
