//! Media asset models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stockmedia_core::types::{Cents, DbId, Timestamp};

/// A row from the `media_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// `IMAGE` or `VIDEO`.
    #[serde(rename = "type")]
    pub media_type: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    /// Public id of the uploaded file at the CDN.
    pub cloudinary_id: String,
    pub original_url: String,
    pub thumbnail_url: String,
    pub preview_url: String,
    pub watermarked_url: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// Video length in seconds.
    pub duration: Option<i32>,
    /// File size in bytes.
    pub file_size: Option<i64>,
    pub format: Option<String>,
    /// Base price in cents.
    pub price: Cents,
    pub license_type: String,
    pub is_active: bool,
    /// Assets are hidden from the public catalog until an admin approves them.
    pub is_approved: bool,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaAsset {
    /// Whether the asset may appear in public listings and be purchased.
    pub fn is_listed(&self) -> bool {
        self.is_active && self.is_approved
    }
}

/// Public subset of the uploading user embedded in listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetOwner {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
}

/// Listing row: asset columns plus the joined owner columns.
#[derive(Debug, Clone, FromRow)]
pub struct MediaAssetOwnerRow {
    #[sqlx(flatten)]
    pub asset: MediaAsset,
    pub owner_name: Option<String>,
    pub owner_email: String,
}

/// Asset with its owner nested under `user`, as listings return it.
#[derive(Debug, Clone, Serialize)]
pub struct MediaAssetWithOwner {
    #[serde(flatten)]
    pub asset: MediaAsset,
    pub user: AssetOwner,
}

impl From<MediaAssetOwnerRow> for MediaAssetWithOwner {
    fn from(row: MediaAssetOwnerRow) -> Self {
        let user = AssetOwner {
            id: row.asset.user_id,
            name: row.owner_name,
            email: row.owner_email,
        };
        Self {
            asset: row.asset,
            user,
        }
    }
}

/// DTO for registering an uploaded asset.
#[derive(Debug, Clone)]
pub struct CreateMediaAsset {
    pub title: String,
    pub description: Option<String>,
    pub media_type: String,
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
    pub license_type: String,
    pub user_id: DbId,
}

/// Public catalog filters. All fields are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct MediaListFilter {
    pub category: Option<String>,
    pub media_type: Option<String>,
    /// Matches assets carrying any of these tags.
    pub tags: Vec<String>,
    /// Case-insensitive title/description substring, or an exact tag.
    pub search: Option<String>,
    pub min_price: Option<Cents>,
    pub max_price: Option<Cents>,
}

/// A pending asset in the admin approval queue.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingApproval {
    pub id: DbId,
    pub title: String,
    pub thumbnail_url: String,
    pub price: Cents,
    pub tags: Vec<String>,
    pub user_id: DbId,
    /// Display name (or email when no name is set) of the uploader.
    pub contributor: String,
    pub uploaded_at: Timestamp,
}
