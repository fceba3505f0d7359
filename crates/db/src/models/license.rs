//! Static license tiers.

use serde::Serialize;
use sqlx::FromRow;
use stockmedia_core::types::{Cents, DbId, Timestamp};

/// A row from the `licenses` table (seeded by migration).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub license_type: String,
    pub price: Cents,
    pub usage_rights: Vec<String>,
    pub restrictions: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
