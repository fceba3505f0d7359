//! Handlers for the `/media` resource: the public catalog and contributor uploads.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stockmedia_core::error::CoreError;
use stockmedia_core::media::{parse_tag_filter, validate_price_range, LicenseType, MediaType};
use stockmedia_core::pagination::{PageRequest, Pagination};
use stockmedia_core::types::{Cents, DbId};
use stockmedia_core::validation::{require_non_empty, validate_non_negative, validate_title};
use stockmedia_db::models::media_asset::{
    CreateMediaAsset, MediaAsset, MediaAssetWithOwner, MediaListFilter,
};
use stockmedia_db::repositories::MediaAssetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireContributor;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /media`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    /// Comma-separated; an asset matches if it has any of them.
    pub tags: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<Cents>,
    pub max_price: Option<Cents>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListResponse {
    pub media_assets: Vec<MediaAssetWithOwner>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAssetResponse {
    pub media_asset: MediaAssetWithOwner,
}

/// Request body for `POST /media`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub cloudinary_id: String,
    pub original_url: String,
    pub thumbnail_url: String,
    pub preview_url: String,
    pub watermarked_url: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration: Option<i32>,
    pub file_size: Option<i64>,
    pub format: Option<String>,
    pub price: Cents,
    pub license_type: Option<LicenseType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMediaResponse {
    pub media_asset: MediaAsset,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/media
///
/// Paginated catalog of active, approved assets, newest first.
pub async fn list_media(
    State(state): State<AppState>,
    Query(params): Query<MediaListParams>,
) -> AppResult<Json<MediaListResponse>> {
    let page = PageRequest::new(params.page, params.limit);
    let filter = listing_filter(params)?;

    let media_assets =
        MediaAssetRepo::list_listed(&state.pool, &filter, page.limit, page.offset()).await?;
    let total = MediaAssetRepo::count_listed(&state.pool, &filter).await?;

    Ok(Json(MediaListResponse {
        media_assets,
        pagination: page.summarize(total),
    }))
}

/// GET /api/media/{id}
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MediaAssetResponse>> {
    let media_asset = MediaAssetRepo::find_listed(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaAsset",
            id,
        }))?;
    Ok(Json(MediaAssetResponse { media_asset }))
}

/// POST /api/media
///
/// Register an uploaded asset for the signed-in contributor. New assets wait
/// for admin approval before they are listed.
pub async fn create_media(
    State(state): State<AppState>,
    RequireContributor(user): RequireContributor,
    Json(input): Json<CreateMediaRequest>,
) -> AppResult<(StatusCode, Json<CreatedMediaResponse>)> {
    validate_title("title", &input.title)?;
    require_non_empty("cloudinaryId", &input.cloudinary_id)?;
    require_non_empty("originalUrl", &input.original_url)?;
    require_non_empty("thumbnailUrl", &input.thumbnail_url)?;
    require_non_empty("previewUrl", &input.preview_url)?;
    validate_non_negative("price", Some(input.price))?;
    validate_non_negative("width", input.width.map(i64::from))?;
    validate_non_negative("height", input.height.map(i64::from))?;
    validate_non_negative("duration", input.duration.map(i64::from))?;
    validate_non_negative("fileSize", input.file_size)?;

    let dto = CreateMediaAsset {
        title: input.title.trim().to_string(),
        description: input.description,
        media_type: input.media_type.as_str().to_string(),
        tags: input
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        category: input.category,
        cloudinary_id: input.cloudinary_id,
        original_url: input.original_url,
        thumbnail_url: input.thumbnail_url,
        preview_url: input.preview_url,
        watermarked_url: input.watermarked_url,
        width: input.width,
        height: input.height,
        duration: input.duration,
        file_size: input.file_size,
        format: input.format,
        price: input.price,
        license_type: input.license_type.unwrap_or_default().as_str().to_string(),
        user_id: user.user_id,
    };

    let media_asset = MediaAssetRepo::create(&state.pool, &dto).await?;

    tracing::info!(
        media_asset_id = media_asset.id,
        user_id = user.user_id,
        media_type = %media_asset.media_type,
        "Media asset created",
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedMediaResponse {
            media_asset,
            message: "Media asset created successfully",
        }),
    ))
}

/// Turn raw catalog query parameters into a validated repository filter.
fn listing_filter(params: MediaListParams) -> Result<MediaListFilter, AppError> {
    validate_price_range(params.min_price, params.max_price)?;

    let media_type = non_blank(params.media_type)
        .map(|t| t.parse::<MediaType>())
        .transpose()?
        .map(|t| t.as_str().to_string());

    Ok(MediaListFilter {
        category: non_blank(params.category),
        media_type,
        tags: params
            .tags
            .as_deref()
            .map(parse_tag_filter)
            .unwrap_or_default(),
        search: non_blank(params.search),
        min_price: params.min_price,
        max_price: params.max_price,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_params_produce_empty_filter() {
        let params = MediaListParams {
            category: Some("  ".into()),
            search: Some(String::new()),
            tags: Some(" , ".into()),
            ..Default::default()
        };
        let filter = listing_filter(params).unwrap();
        assert!(filter.category.is_none());
        assert!(filter.search.is_none());
        assert!(filter.tags.is_empty());
    }

    #[test]
    fn media_type_is_validated() {
        let params = MediaListParams {
            media_type: Some("AUDIO".into()),
            ..Default::default()
        };
        assert_matches!(
            listing_filter(params),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let params = MediaListParams {
            min_price: Some(5000),
            max_price: Some(1000),
            ..Default::default()
        };
        assert!(listing_filter(params).is_err());
    }
}
