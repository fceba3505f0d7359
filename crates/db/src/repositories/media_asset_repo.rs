//! Repository for the `media_assets` table.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use stockmedia_core::media::like_pattern;
use stockmedia_core::types::DbId;

use crate::models::media_asset::{
    CreateMediaAsset, MediaAsset, MediaAssetOwnerRow, MediaAssetWithOwner, MediaListFilter,
    PendingApproval,
};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

const COLUMNS: &str = "\
    id, title, description, media_type, tags, category, cloudinary_id, \
    original_url, thumbnail_url, preview_url, watermarked_url, width, height, \
    duration, file_size, format, price, license_type, is_active, is_approved, \
    user_id, created_at, updated_at";

/// Asset columns qualified with the `m` alias plus the joined owner columns.
const OWNER_COLUMNS: &str = "\
    m.id, m.title, m.description, m.media_type, m.tags, m.category, m.cloudinary_id, \
    m.original_url, m.thumbnail_url, m.preview_url, m.watermarked_url, m.width, m.height, \
    m.duration, m.file_size, m.format, m.price, m.license_type, m.is_active, m.is_approved, \
    m.user_id, m.created_at, m.updated_at, \
    u.name AS owner_name, u.email AS owner_email";

/// Only active, approved assets are public.
const LISTED: &str = "m.is_active AND m.is_approved";

/// Provides CRUD and catalog queries for media assets.
pub struct MediaAssetRepo;

impl MediaAssetRepo {
    /// Register a new asset. It starts active and unapproved.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaAsset,
    ) -> Result<MediaAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_assets \
                (title, description, media_type, tags, category, cloudinary_id, \
                 original_url, thumbnail_url, preview_url, watermarked_url, width, height, \
                 duration, file_size, format, price, license_type, user_id, \
                 is_active, is_approved) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                     $16, $17, $18, TRUE, FALSE) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.media_type)
            .bind(&input.tags)
            .bind(&input.category)
            .bind(&input.cloudinary_id)
            .bind(&input.original_url)
            .bind(&input.thumbnail_url)
            .bind(&input.preview_url)
            .bind(&input.watermarked_url)
            .bind(input.width)
            .bind(input.height)
            .bind(input.duration)
            .bind(input.file_size)
            .bind(&input.format)
            .bind(input.price)
            .bind(&input.license_type)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find any asset by ID regardless of approval state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_assets WHERE id = $1");
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a publicly listed asset with its owner.
    pub async fn find_listed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MediaAssetWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {OWNER_COLUMNS} \
             FROM media_assets m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.id = $1 AND {LISTED}"
        );
        let row = sqlx::query_as::<_, MediaAssetOwnerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(MediaAssetWithOwner::from))
    }

    /// Fetch the listed assets among `ids`. Missing or unlisted ids are
    /// simply absent from the result.
    pub async fn find_listed_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_assets m \
             WHERE m.id = ANY($1) AND {LISTED}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Fetch assets by id regardless of state.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_assets WHERE id = ANY($1)");
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Public catalog
    // -----------------------------------------------------------------------

    /// List listed assets matching `filter`, newest first.
    pub async fn list_listed(
        pool: &PgPool,
        filter: &MediaListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaAssetWithOwner>, sqlx::Error> {
        let (where_clause, bind_idx) = listing_where_clause(filter);
        let query = format!(
            "SELECT {OWNER_COLUMNS} \
             FROM media_assets m \
             JOIN users u ON u.id = m.user_id \
             {where_clause} \
             ORDER BY m.created_at DESC, m.id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let rows = bind_listing_filter(sqlx::query_as::<_, MediaAssetOwnerRow>(&query), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(MediaAssetWithOwner::from).collect())
    }

    /// Count listed assets matching `filter`.
    pub async fn count_listed(pool: &PgPool, filter: &MediaListFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = listing_where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM media_assets m {where_clause}");
        let (count,) = bind_listing_filter(sqlx::query_as::<_, (i64,)>(&query), filter)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Contributor and admin views
    // -----------------------------------------------------------------------

    /// All of a user's uploads in any state, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_assets WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Active assets awaiting approval, oldest first.
    pub async fn list_pending(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PendingApproval>, sqlx::Error> {
        sqlx::query_as::<_, PendingApproval>(
            "SELECT m.id, m.title, m.thumbnail_url, m.price, m.tags, m.user_id, \
                    COALESCE(u.name, u.email) AS contributor, \
                    m.created_at AS uploaded_at \
             FROM media_assets m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.is_active AND NOT m.is_approved \
             ORDER BY m.created_at, m.id \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM media_assets WHERE is_active AND NOT is_approved",
        )
        .fetch_one(pool)
        .await
    }

    /// Approve an asset. Returns `None` if no row with `id` exists.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!(
            "UPDATE media_assets SET is_approved = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reject an asset: it is unapproved and deactivated, never deleted.
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!(
            "UPDATE media_assets SET is_approved = FALSE, is_active = FALSE \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Listing filter helpers
// ---------------------------------------------------------------------------

/// Build the `WHERE` clause for a catalog query. Returns the clause and the
/// next free bind index.
fn listing_where_clause(filter: &MediaListFilter) -> (String, u32) {
    let mut conditions = vec![LISTED.to_string()];
    let mut bind_idx = 1u32;

    if filter.category.is_some() {
        conditions.push(format!("m.category = ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.media_type.is_some() {
        conditions.push(format!("m.media_type = ${bind_idx}"));
        bind_idx += 1;
    }
    if !filter.tags.is_empty() {
        conditions.push(format!("m.tags && ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.search.is_some() {
        conditions.push(format!(
            "(m.title ILIKE ${bind_idx} OR m.description ILIKE ${bind_idx} \
              OR ${next} = ANY(m.tags))",
            next = bind_idx + 1,
        ));
        bind_idx += 2;
    }
    if filter.min_price.is_some() {
        conditions.push(format!("m.price >= ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.max_price.is_some() {
        conditions.push(format!("m.price <= ${bind_idx}"));
        bind_idx += 1;
    }

    (format!("WHERE {}", conditions.join(" AND ")), bind_idx)
}

/// Bind filter values in the same order [`listing_where_clause`] numbered them.
fn bind_listing_filter<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &'q MediaListFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    if let Some(ref category) = filter.category {
        q = q.bind(category);
    }
    if let Some(ref media_type) = filter.media_type {
        q = q.bind(media_type);
    }
    if !filter.tags.is_empty() {
        q = q.bind(&filter.tags);
    }
    if let Some(ref search) = filter.search {
        q = q.bind(like_pattern(search)).bind(search);
    }
    if let Some(min_price) = filter.min_price {
        q = q.bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        q = q.bind(max_price);
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_only_restricts_to_listed() {
        let (clause, next) = listing_where_clause(&MediaListFilter::default());
        assert_eq!(clause, "WHERE m.is_active AND m.is_approved");
        assert_eq!(next, 1);
    }

    #[test]
    fn search_consumes_two_binds() {
        let filter = MediaListFilter {
            category: Some("nature".into()),
            search: Some("sunset".into()),
            max_price: Some(5000),
            ..Default::default()
        };
        let (clause, next) = listing_where_clause(&filter);
        assert!(clause.contains("m.category = $1"));
        assert!(clause.contains("m.title ILIKE $2"));
        assert!(clause.contains("$3 = ANY(m.tags)"));
        assert!(clause.contains("m.price <= $4"));
        assert_eq!(next, 5);
    }

    #[test]
    fn tag_filter_uses_overlap() {
        let filter = MediaListFilter {
            tags: vec!["city".into(), "night".into()],
            ..Default::default()
        };
        let (clause, _) = listing_where_clause(&filter);
        assert!(clause.contains("m.tags && $1"));
    }
}
