//! Handlers for the `/licenses` resource: pricing tiers and per-asset quotes.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use stockmedia_core::error::CoreError;
use stockmedia_core::media::LicenseType;
use stockmedia_core::types::{Cents, DbId};
use stockmedia_db::models::license::License;
use stockmedia_db::repositories::{LicenseRepo, MediaAssetRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A license tier with the price multiplier it applies.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseTier {
    #[serde(flatten)]
    pub license: License,
    pub multiplier: i64,
}

#[derive(Debug, Serialize)]
pub struct LicenseListResponse {
    pub licenses: Vec<LicenseTier>,
}

/// Query parameters for `GET /licenses/quote`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub media_asset_id: DbId,
    pub license_type: Option<LicenseType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub media_asset_id: DbId,
    pub license_type: LicenseType,
    pub base_price: Cents,
    pub multiplier: i64,
    pub price: Cents,
}

/// GET /api/licenses
pub async fn list_licenses(State(state): State<AppState>) -> AppResult<Json<LicenseListResponse>> {
    let licenses = LicenseRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|license| {
            let multiplier = license
                .license_type
                .parse::<LicenseType>()
                .map(LicenseType::multiplier)
                .unwrap_or(1);
            LicenseTier {
                license,
                multiplier,
            }
        })
        .collect();
    Ok(Json(LicenseListResponse { licenses }))
}

/// GET /api/licenses/quote?mediaAssetId=&licenseType=
///
/// Price of a listed asset under a license tier (Standard by default).
pub async fn quote(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> AppResult<Json<QuoteResponse>> {
    let asset = MediaAssetRepo::find_listed(&state.pool, params.media_asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaAsset",
            id: params.media_asset_id,
        }))?
        .asset;

    let license_type = params.license_type.unwrap_or_default();
    let price = license_type.apply(asset.price)?;

    Ok(Json(QuoteResponse {
        media_asset_id: asset.id,
        license_type,
        base_price: asset.price,
        multiplier: license_type.multiplier(),
        price,
    }))
}
