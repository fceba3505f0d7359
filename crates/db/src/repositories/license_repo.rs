//! Repository for the `licenses` table.

use sqlx::PgPool;

use crate::models::license::License;

const COLUMNS: &str = "id, name, description, license_type, price, usage_rights, \
                       restrictions, created_at, updated_at";

/// Read access to the migration-seeded license tiers.
pub struct LicenseRepo;

impl LicenseRepo {
    /// All tiers, cheapest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<License>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM licenses ORDER BY price, id");
        sqlx::query_as::<_, License>(&query).fetch_all(pool).await
    }

    /// Find a tier by its `STANDARD`/`EXTENDED`/`PREMIUM` key.
    pub async fn find_by_type(
        pool: &PgPool,
        license_type: &str,
    ) -> Result<Option<License>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM licenses WHERE license_type = $1");
        sqlx::query_as::<_, License>(&query)
            .bind(license_type)
            .fetch_optional(pool)
            .await
    }
}
