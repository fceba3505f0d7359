//! Handlers for `/dashboard`: the signed-in user's own uploads, purchases,
//! earnings and payouts.
//!
//! All handlers require a session via [`RequireAuth`].

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use stockmedia_core::pricing::contributor_share;
use stockmedia_core::roles::UserRole;
use stockmedia_core::types::{Cents, DbId};
use stockmedia_db::models::dashboard::UserActivity;
use stockmedia_db::models::media_asset::MediaAsset;
use stockmedia_db::models::order::OrderWithItems;
use stockmedia_db::models::payout::Payout;
use stockmedia_db::repositories::{MediaAssetRepo, OrderRepo, PayoutRepo, StatsRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user_id: DbId,
    pub role: UserRole,
    pub uploads: i64,
    pub approved_uploads: i64,
    /// Contributor share of all sales of the user's assets.
    pub total_earnings: Cents,
    pub paid_out: Cents,
    /// Earnings not yet covered by a completed payout.
    pub pending_earnings: Cents,
    pub purchases: i64,
    pub total_spent: Cents,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadsResponse {
    pub media_assets: Vec<MediaAsset>,
}

#[derive(Debug, Serialize)]
pub struct PurchasesResponse {
    pub orders: Vec<OrderWithItems>,
}

#[derive(Debug, Serialize)]
pub struct PayoutsResponse {
    pub payouts: Vec<Payout>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/dashboard
pub async fn summary(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DashboardSummary>> {
    let activity = StatsRepo::user_activity(&state.pool, user.user_id, &user.email).await?;
    Ok(Json(summarize(user.user_id, user.role, &activity)))
}

/// GET /api/dashboard/uploads
///
/// Every asset the user uploaded, whatever its approval state.
pub async fn uploads(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<UploadsResponse>> {
    let media_assets = MediaAssetRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(UploadsResponse { media_assets }))
}

/// GET /api/dashboard/purchases
///
/// Completed orders placed with the user's email, with their items.
pub async fn purchases(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<PurchasesResponse>> {
    let orders = OrderRepo::list_completed_by_email(&state.pool, &user.email).await?;

    let mut result = Vec::with_capacity(orders.len());
    for order in orders {
        let items = OrderRepo::list_items(&state.pool, order.id).await?;
        let items = OrderRepo::attach_assets(&state.pool, items).await?;
        result.push(OrderWithItems { order, items });
    }
    Ok(Json(PurchasesResponse { orders: result }))
}

/// GET /api/dashboard/payouts
pub async fn payouts(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<PayoutsResponse>> {
    let payouts = PayoutRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(PayoutsResponse { payouts }))
}

fn summarize(user_id: DbId, role: UserRole, activity: &UserActivity) -> DashboardSummary {
    let total_earnings = contributor_share(activity.gross_sales);
    DashboardSummary {
        user_id,
        role,
        uploads: activity.uploads,
        approved_uploads: activity.approved_uploads,
        total_earnings,
        paid_out: activity.paid_out,
        pending_earnings: (total_earnings - activity.paid_out).max(0),
        purchases: activity.purchases,
        total_spent: activity.total_spent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earnings_are_contributor_share_of_sales() {
        let activity = UserActivity {
            uploads: 3,
            approved_uploads: 2,
            gross_sales: 2500,
            paid_out: 1000,
            purchases: 0,
            total_spent: 0,
        };
        let summary = summarize(7, UserRole::Contributor, &activity);
        assert_eq!(summary.total_earnings, 1500);
        assert_eq!(summary.pending_earnings, 500);
    }

    #[test]
    fn overpaid_contributor_has_no_pending_earnings() {
        let activity = UserActivity {
            uploads: 0,
            approved_uploads: 0,
            gross_sales: 1000,
            paid_out: 5000,
            purchases: 1,
            total_spent: 1000,
        };
        assert_eq!(
            summarize(1, UserRole::Customer, &activity).pending_earnings,
            0
        );
    }
}
