//! Aggregate queries behind the admin and user dashboards.

use sqlx::PgPool;
use stockmedia_core::types::DbId;

use crate::models::dashboard::{AdminStats, UserActivity};

/// Read-only aggregate queries. `SUM` over `BIGINT` yields `NUMERIC`, so
/// every sum is cast back to `BIGINT`.
pub struct StatsRepo;

impl StatsRepo {
    /// Platform-wide totals for the admin overview.
    pub async fn admin_stats(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
        sqlx::query_as::<_, AdminStats>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users WHERE role = 'CONTRIBUTOR') AS total_contributors,
                (SELECT COUNT(*) FROM users WHERE role = 'CUSTOMER') AS total_customers,
                (SELECT COALESCE(SUM(total_amount), 0)::BIGINT
                   FROM orders WHERE status = 'COMPLETED') AS total_revenue,
                (SELECT COALESCE(SUM(total_amount), 0)::BIGINT
                   FROM orders
                  WHERE status = 'COMPLETED'
                    AND completed_at >= date_trunc('month', NOW() AT TIME ZONE 'UTC')
                                        AT TIME ZONE 'UTC') AS monthly_revenue,
                (SELECT COUNT(*) FROM media_assets
                  WHERE is_active AND NOT is_approved) AS pending_approvals,
                (SELECT COUNT(*) FROM media_assets) AS total_uploads,
                (SELECT COUNT(*) FROM media_assets WHERE is_approved) AS approved_uploads",
        )
        .fetch_one(pool)
        .await
    }

    /// Upload, sales, payout and purchase figures for one user.
    ///
    /// Purchases are matched by customer email so that guest checkouts made
    /// before sign-up still count.
    pub async fn user_activity(
        pool: &PgPool,
        user_id: DbId,
        email: &str,
    ) -> Result<UserActivity, sqlx::Error> {
        sqlx::query_as::<_, UserActivity>(
            "SELECT
                (SELECT COUNT(*) FROM media_assets WHERE user_id = $1) AS uploads,
                (SELECT COUNT(*) FROM media_assets
                  WHERE user_id = $1 AND is_approved) AS approved_uploads,
                (SELECT COALESCE(SUM(oi.total_price), 0)::BIGINT
                   FROM order_items oi
                   JOIN orders o ON o.id = oi.order_id
                   JOIN media_assets m ON m.id = oi.media_asset_id
                  WHERE m.user_id = $1 AND o.status = 'COMPLETED') AS gross_sales,
                (SELECT COALESCE(SUM(amount), 0)::BIGINT
                   FROM payouts WHERE user_id = $1 AND status = 'COMPLETED') AS paid_out,
                (SELECT COUNT(*) FROM orders
                  WHERE customer_email = $2 AND status = 'COMPLETED') AS purchases,
                (SELECT COALESCE(SUM(total_amount), 0)::BIGINT
                   FROM orders
                  WHERE customer_email = $2 AND status = 'COMPLETED') AS total_spent",
        )
        .bind(user_id)
        .bind(email)
        .fetch_one(pool)
        .await
    }
}
