//! Aggregate figures for the admin and user dashboards.

use serde::Serialize;
use sqlx::FromRow;
use stockmedia_core::types::Cents;

/// Platform-wide figures for the admin overview.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub total_contributors: i64,
    pub total_customers: i64,
    /// Sum of completed order totals, in cents.
    pub total_revenue: Cents,
    /// Completed order totals since the start of the current UTC month.
    pub monthly_revenue: Cents,
    pub pending_approvals: i64,
    pub total_uploads: i64,
    pub approved_uploads: i64,
}

/// Raw per-user aggregates; earnings are derived in the handler.
#[derive(Debug, Clone, FromRow)]
pub struct UserActivity {
    pub uploads: i64,
    pub approved_uploads: i64,
    /// Gross sales of the user's assets across completed orders.
    pub gross_sales: Cents,
    /// Sum of completed payouts to the user.
    pub paid_out: Cents,
    pub purchases: i64,
    pub total_spent: Cents,
}
