//! Handlers for the `/downloads` resource: time-limited links to purchased files.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use serde::{Deserialize, Serialize};
use stockmedia_core::cdn::attachment_url;
use stockmedia_core::error::CoreError;
use stockmedia_core::media::MediaType;
use stockmedia_core::types::DbId;
use stockmedia_db::models::media_asset::MediaAsset;
use stockmedia_db::repositories::{MediaAssetRepo, OrderRepo};

use crate::auth::jwt::{generate_download_token, validate_download_token, DOWNLOAD_TOKEN_TTL_SECS};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /downloads/sign`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignDownloadRequest {
    pub media_asset_id: DbId,
    pub order_id: DbId,
}

/// Summary of the purchased file returned with a download link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadAsset {
    pub id: DbId,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub format: Option<String>,
    pub file_size: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignDownloadResponse {
    pub download_url: String,
    pub token: String,
    pub expires_in: i64,
    pub media_asset: DownloadAsset,
}

/// POST /api/downloads/sign
///
/// Issue a one-hour download link for an asset in a completed order.
pub async fn sign_download(
    State(state): State<AppState>,
    Json(input): Json<SignDownloadRequest>,
) -> AppResult<Json<SignDownloadResponse>> {
    let not_found = || AppError::NotFound("Order not found or not completed".into());

    let order =
        OrderRepo::find_completed_with_asset(&state.pool, input.order_id, input.media_asset_id)
            .await?
            .ok_or_else(not_found)?;
    let asset = MediaAssetRepo::find_by_id(&state.pool, input.media_asset_id)
        .await?
        .ok_or_else(not_found)?;

    let token = generate_download_token(
        asset.id,
        &asset.cloudinary_id,
        order.id,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Download token error: {e}")))?;
    let download_url = delivery_url(&state, &asset)?;

    tracing::info!(
        order_id = order.id,
        media_asset_id = asset.id,
        "Download link issued",
    );

    Ok(Json(SignDownloadResponse {
        download_url,
        token,
        expires_in: DOWNLOAD_TOKEN_TTL_SECS,
        media_asset: DownloadAsset {
            id: asset.id,
            title: asset.title,
            media_type: asset.media_type,
            format: asset.format,
            file_size: asset.file_size,
        },
    }))
}

/// GET /api/downloads/{token}
///
/// Redirect (307) a valid download token to the CDN attachment URL.
pub async fn redeem_download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Redirect> {
    let claims = validate_download_token(&token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired download link".into(),
        ))
    })?;

    let asset = MediaAssetRepo::find_by_id(&state.pool, claims.media_asset_id)
        .await?
        .filter(|a| a.cloudinary_id == claims.cloudinary_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaAsset",
            id: claims.media_asset_id,
        }))?;

    let url = delivery_url(&state, &asset)?;
    tracing::info!(
        order_id = claims.order_id,
        media_asset_id = asset.id,
        jti = %claims.jti,
        "Download redeemed",
    );
    Ok(Redirect::temporary(&url))
}

fn delivery_url(state: &AppState, asset: &MediaAsset) -> Result<String, AppError> {
    let cloud_name = state
        .config
        .cdn
        .cloud_name
        .as_deref()
        .ok_or_else(|| AppError::InternalError("CLOUDINARY_CLOUD_NAME is not set".into()))?;
    let media_type: MediaType = asset.media_type.parse()?;
    Ok(attachment_url(cloud_name, media_type, &asset.cloudinary_id))
}
