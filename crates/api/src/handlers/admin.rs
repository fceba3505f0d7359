//! Handlers for the `/admin` resource: platform stats, the approval queue,
//! user listing and contributor payouts.
//!
//! All handlers require the `ADMIN` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stockmedia_core::error::CoreError;
use stockmedia_core::pagination::Pagination;
use stockmedia_core::payouts::{ensure_completable, validate_payout_amount, PAYOUT_STATUS_PENDING};
use stockmedia_core::roles::UserRole;
use stockmedia_core::types::{Cents, DbId};
use stockmedia_db::models::dashboard::AdminStats;
use stockmedia_db::models::media_asset::{MediaAsset, PendingApproval};
use stockmedia_db::models::payout::{CreatePayout, Payout};
use stockmedia_db::models::user::User;
use stockmedia_db::repositories::{MediaAssetRepo, PayoutRepo, StatsRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApprovalQueueResponse {
    pub approvals: Vec<PendingApproval>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAssetMessage {
    pub media_asset: MediaAsset,
    pub message: &'static str,
}

/// Request body for `POST /admin/payouts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayoutRequest {
    pub user_id: DbId,
    pub amount: Cents,
    pub payment_method: Option<String>,
    pub account_details: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct PayoutResponse {
    pub payout: Payout,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<AdminStats>> {
    let stats = StatsRepo::admin_stats(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/admin/approvals
///
/// Active assets awaiting review, oldest first.
pub async fn approval_queue(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApprovalQueueResponse>> {
    let page = params.page_request();
    let approvals = MediaAssetRepo::list_pending(&state.pool, page.limit, page.offset()).await?;
    let total = MediaAssetRepo::count_pending(&state.pool).await?;
    Ok(Json(ApprovalQueueResponse {
        approvals,
        pagination: page.summarize(total),
    }))
}

/// POST /api/admin/media/{id}/approve
pub async fn approve_media(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MediaAssetMessage>> {
    let media_asset = MediaAssetRepo::approve(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaAsset",
            id,
        }))?;

    tracing::info!(media_asset_id = id, admin_id = admin.user_id, "Media asset approved");

    Ok(Json(MediaAssetMessage {
        media_asset,
        message: "Media asset approved",
    }))
}

/// POST /api/admin/media/{id}/reject
///
/// Rejection deactivates the asset; nothing is deleted.
pub async fn reject_media(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MediaAssetMessage>> {
    let media_asset = MediaAssetRepo::reject(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaAsset",
            id,
        }))?;

    tracing::info!(media_asset_id = id, admin_id = admin.user_id, "Media asset rejected");

    Ok(Json(MediaAssetMessage {
        media_asset,
        message: "Media asset rejected",
    }))
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<UserListResponse>> {
    let page = params.page_request();
    let users = UserRepo::list_recent(&state.pool, page.limit, page.offset()).await?;
    let total = UserRepo::count(&state.pool).await?;
    Ok(Json(UserListResponse {
        users,
        pagination: page.summarize(total),
    }))
}

/// POST /api/admin/payouts
///
/// Record a pending payout to a contributor.
pub async fn create_payout(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreatePayoutRequest>,
) -> AppResult<(StatusCode, Json<PayoutResponse>)> {
    validate_payout_amount(input.amount)?;

    let recipient = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;
    let role: UserRole = recipient.role.parse().unwrap_or_default();
    if !role.can_upload() {
        return Err(AppError::Core(CoreError::Validation(
            "Payouts can only be made to contributors".into(),
        )));
    }

    let dto = CreatePayout {
        user_id: recipient.id,
        amount: input.amount,
        status: PAYOUT_STATUS_PENDING.to_string(),
        payment_method: input.payment_method,
        account_details: input.account_details,
    };
    let payout = PayoutRepo::create(&state.pool, &dto).await?;

    tracing::info!(
        payout_id = payout.id,
        user_id = payout.user_id,
        amount = payout.amount,
        admin_id = admin.user_id,
        "Payout created",
    );

    Ok((StatusCode::CREATED, Json(PayoutResponse { payout })))
}

/// POST /api/admin/payouts/{id}/complete
pub async fn complete_payout(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<PayoutResponse>> {
    let payout = PayoutRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payout",
            id,
        }))?;
    ensure_completable(&payout.status)?;

    let payout = PayoutRepo::complete(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Payout is no longer open".into(),
        ))
    })?;

    tracing::info!(payout_id = id, admin_id = admin.user_id, "Payout completed");

    Ok(Json(PayoutResponse { payout }))
}
