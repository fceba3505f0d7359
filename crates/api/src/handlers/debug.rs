//! Handler for `/debug/env`: which vendor credentials are configured.
//!
//! Reports presence only, never values. Hidden in production.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvCheck {
    pub app_env: String,
    pub supabase_url: bool,
    pub supabase_anon_key: bool,
    pub supabase_service_role_key: bool,
    pub supabase_jwt_secret: bool,
    pub cloudinary_cloud_name: bool,
    pub cloudinary_api_key: bool,
    pub cloudinary_api_secret: bool,
    pub cloudinary_upload_preset: bool,
    pub anet_signature_key: bool,
    pub static_dir: bool,
}

/// GET /api/debug/env
pub async fn env_check(State(state): State<AppState>) -> AppResult<Json<EnvCheck>> {
    if state.config.is_production() {
        return Err(AppError::NotFound("Not found".into()));
    }
    Ok(Json(env_presence(&state.config)))
}

fn env_presence(config: &ServerConfig) -> EnvCheck {
    EnvCheck {
        app_env: config.app_env.clone(),
        supabase_url: config.identity.url.is_some(),
        supabase_anon_key: config.identity.anon_key.is_some(),
        supabase_service_role_key: config.identity.service_role_key.is_some(),
        supabase_jwt_secret: config.identity.jwt_secret.is_some(),
        cloudinary_cloud_name: config.cdn.cloud_name.is_some(),
        cloudinary_api_key: config.cdn.api_key.is_some(),
        cloudinary_api_secret: config.cdn.api_secret.is_some(),
        cloudinary_upload_preset: config.cdn.upload_preset.is_some(),
        anet_signature_key: config.payments.signature_key.is_some(),
        static_dir: config.static_dir.is_some(),
    }
}
