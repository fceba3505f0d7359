//! Signed download tokens.
//!
//! A download token is an HS256 JWT carrying [`DownloadClaims`]. It is minted
//! once an order is completed and lets the holder fetch one purchased asset
//! until it expires.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stockmedia_core::types::DbId;
use uuid::Uuid;

/// Download token lifetime in seconds.
pub const DOWNLOAD_TOKEN_TTL_SECS: i64 = 3600;

/// Claims embedded in every download token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadClaims {
    pub media_asset_id: DbId,
    /// Public id of the file at the CDN.
    pub cloudinary_id: String,
    pub order_id: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for download token signing.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var      | Required | Default |
    /// |--------------|----------|---------|
    /// | `JWT_SECRET` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Mint a download token for one purchased asset.
pub fn generate_download_token(
    media_asset_id: DbId,
    cloudinary_id: &str,
    order_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = DownloadClaims {
        media_asset_id,
        cloudinary_id: cloudinary_id.to_string(),
        order_id,
        exp: now + DOWNLOAD_TOKEN_TTL_SECS,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a download token.
///
/// Validates the signature and expiration automatically.
pub fn validate_download_token(
    token: &str,
    config: &JwtConfig,
) -> Result<DownloadClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<DownloadClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
