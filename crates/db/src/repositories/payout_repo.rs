//! Repository for the `payouts` table.

use sqlx::PgPool;
use stockmedia_core::payouts::PAYOUT_STATUS_COMPLETED;
use stockmedia_core::types::DbId;

use crate::models::payout::{CreatePayout, Payout};

const COLUMNS: &str = "id, amount, status, payment_method, account_details, user_id, \
                       created_at, updated_at, processed_at";

/// Provides CRUD operations for contributor payouts.
pub struct PayoutRepo;

impl PayoutRepo {
    /// Record a new payout.
    pub async fn create(pool: &PgPool, input: &CreatePayout) -> Result<Payout, sqlx::Error> {
        let query = format!(
            "INSERT INTO payouts (user_id, amount, status, payment_method, account_details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payout>(&query)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(&input.status)
            .bind(&input.payment_method)
            .bind(&input.account_details)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payouts WHERE id = $1");
        sqlx::query_as::<_, Payout>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's payouts, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Payout>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payouts WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Payout>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark an open payout as completed.
    ///
    /// Returns `None` when the payout does not exist or is no longer open.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<Payout>, sqlx::Error> {
        let query = format!(
            "UPDATE payouts SET status = $2, processed_at = NOW()
             WHERE id = $1 AND status IN ('PENDING', 'PROCESSING')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payout>(&query)
            .bind(id)
            .bind(PAYOUT_STATUS_COMPLETED)
            .fetch_optional(pool)
            .await
    }
}
