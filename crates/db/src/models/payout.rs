//! Contributor payout records.

use serde::Serialize;
use sqlx::FromRow;
use stockmedia_core::types::{Cents, DbId, Timestamp};

/// A row from the `payouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: DbId,
    pub amount: Cents,
    pub status: String,
    pub payment_method: Option<String>,
    pub account_details: Option<serde_json::Value>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub processed_at: Option<Timestamp>,
}

/// DTO for recording a new payout.
#[derive(Debug, Clone)]
pub struct CreatePayout {
    pub user_id: DbId,
    pub amount: Cents,
    pub status: String,
    pub payment_method: Option<String>,
    pub account_details: Option<serde_json::Value>,
}
