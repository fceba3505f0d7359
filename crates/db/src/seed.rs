//! Demo data for local development.
//!
//! Every insert is keyed on a natural unique column (`email`,
//! `cloudinary_id`, `order_number`) with `ON CONFLICT DO NOTHING`, so running
//! the seed twice leaves the database unchanged.

use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use stockmedia_core::pricing::{contributor_share, order_total, price_line};
use stockmedia_core::types::{Cents, DbId};

/// Order number of the seeded completed order.
pub const DEMO_ORDER_NUMBER: &str = "ORD-20240101-000001";

struct DemoUser {
    email: &'static str,
    name: &'static str,
    role: &'static str,
    supabase_id: &'static str,
}

const USERS: &[DemoUser] = &[
    DemoUser {
        email: "admin@stockplatform.com",
        name: "Admin User",
        role: "ADMIN",
        supabase_id: "admin-supabase-id",
    },
    DemoUser {
        email: "john@photographer.com",
        name: "John Photographer",
        role: "CONTRIBUTOR",
        supabase_id: "contributor1-supabase-id",
    },
    DemoUser {
        email: "sarah@designer.com",
        name: "Sarah Designer",
        role: "CONTRIBUTOR",
        supabase_id: "contributor2-supabase-id",
    },
    DemoUser {
        email: "customer@example.com",
        name: "Jane Customer",
        role: "CUSTOMER",
        supabase_id: "customer1-supabase-id",
    },
];

struct DemoAsset {
    title: &'static str,
    description: &'static str,
    media_type: &'static str,
    tags: &'static [&'static str],
    category: &'static str,
    cloudinary_id: &'static str,
    /// File extension of the original upload.
    ext: &'static str,
    duration: Option<i32>,
    file_size: i64,
    price: Cents,
    license_type: &'static str,
    /// Index into [`USERS`].
    owner: usize,
}

const ASSETS: &[DemoAsset] = &[
    DemoAsset {
        title: "Beautiful Mountain Landscape",
        description: "Stunning mountain view with clear blue sky and dramatic clouds. \
                      Perfect for nature-themed projects.",
        media_type: "IMAGE",
        tags: &["nature", "mountain", "landscape", "sky", "outdoor"],
        category: "Nature",
        cloudinary_id: "sample-mountain-landscape",
        ext: "jpg",
        duration: None,
        file_size: 2_048_000,
        price: 2500,
        license_type: "STANDARD",
        owner: 1,
    },
    DemoAsset {
        title: "Modern Office Space",
        description: "Clean and modern office interior design with natural lighting.",
        media_type: "IMAGE",
        tags: &["business", "office", "interior", "modern", "work"],
        category: "Business",
        cloudinary_id: "sample-office-space",
        ext: "jpg",
        duration: None,
        file_size: 1_800_000,
        price: 3500,
        license_type: "EXTENDED",
        owner: 2,
    },
    DemoAsset {
        title: "Product Demo Video",
        description: "Professional product demonstration video showcasing modern technology.",
        media_type: "VIDEO",
        tags: &["product", "demo", "marketing", "technology", "business"],
        category: "Technology",
        cloudinary_id: "sample-product-demo",
        ext: "mp4",
        duration: Some(30),
        file_size: 15_728_640,
        price: 7500,
        license_type: "PREMIUM",
        owner: 1,
    },
    DemoAsset {
        title: "City Skyline at Night",
        description: "Breathtaking city skyline view during golden hour with beautiful lighting.",
        media_type: "IMAGE",
        tags: &["city", "night", "skyline", "urban", "architecture"],
        category: "Urban",
        cloudinary_id: "sample-city-skyline",
        ext: "jpg",
        duration: None,
        file_size: 2_200_000,
        price: 3000,
        license_type: "STANDARD",
        owner: 2,
    },
    DemoAsset {
        title: "Abstract Art Background",
        description: "Colorful abstract art background perfect for creative projects.",
        media_type: "IMAGE",
        tags: &["abstract", "art", "background", "colorful", "creative"],
        category: "Art",
        cloudinary_id: "sample-abstract-art",
        ext: "jpg",
        duration: None,
        file_size: 1_500_000,
        price: 2000,
        license_type: "STANDARD",
        owner: 1,
    },
];

/// Extra photo library for the discover page: `(title, photo URL)`.
const DISCOVER_LIBRARY: &[(&str, &str)] = &[
    ("Mist over the Forest", "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee"),
    ("Golden Gate at Dusk", "https://images.unsplash.com/photo-1501594907352-04cda38ebc29"),
    ("Desert Road", "https://images.unsplash.com/photo-1501785888041-af3ef285b470"),
    ("Snowy Peak", "https://images.unsplash.com/photo-1501785888041-659ace7f3f7b"),
    ("Seaside Cliffs", "https://images.unsplash.com/photo-1507525428034-b723cf961d3e"),
    ("City Reflections", "https://images.unsplash.com/photo-1472214103451-9374bd1c798e"),
    ("Tropical Leaves", "https://images.unsplash.com/photo-1469474968028-56623f02e42e"),
    ("Abstract Glass", "https://images.unsplash.com/photo-1496307042754-b4aa456c4a2d"),
    ("Minimal Workspace", "https://images.unsplash.com/photo-1498050108023-c5249f4df085"),
    ("Sunset Over Lake", "https://images.unsplash.com/photo-1500534314209-a25ddb2bd429"),
    ("Coffee and Code", "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085"),
    ("Blue Hour Skyline", "https://images.unsplash.com/photo-1467269204594-9661b134dd2b"),
    ("Boardwalk", "https://images.unsplash.com/photo-1500534318417-3a4d3d7bd1d6"),
    ("Waves Crashing", "https://images.unsplash.com/photo-1507525428034-b723cf961d3e"),
    ("Monstera", "https://images.unsplash.com/photo-1469474968028-56623f02e42e"),
    ("Pastel Building", "https://images.unsplash.com/photo-1491553895911-0055eca6402d"),
    ("Neon Alley", "https://images.unsplash.com/photo-1520977498770-5f3f84b0e8f3"),
    ("Foggy Pines", "https://images.unsplash.com/photo-1441974231531-c6227db76b6e"),
    ("Mountain Trail", "https://images.unsplash.com/photo-1441974231531-c6227db76b6e"),
    ("Street Crossing", "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d"),
    ("Cyclist in Motion", "https://images.unsplash.com/photo-1508609349937-5ec4ae374ebf"),
    ("Rustic Cabin", "https://images.unsplash.com/photo-1475856034131-0f9d746d1f4b"),
    ("Lavender Fields", "https://images.unsplash.com/photo-1469474968028-56623f02e42e"),
    ("Tea Time", "https://images.unsplash.com/photo-1498654896293-37aacf113fd9"),
    ("Foggy Bridge", "https://images.unsplash.com/photo-1501594907352-04cda38ebc29"),
];

const DISCOVER_PRICE: Cents = 2000;

/// Titles of the assets bought in the demo order.
const DEMO_ORDER_ASSETS: &[&str] = &["Beautiful Mountain Landscape", "City Skyline at Night"];

/// Row counts after seeding.
#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    pub users: i64,
    pub media_assets: i64,
    pub licenses: i64,
    pub orders: i64,
    pub payouts: i64,
}

/// Errors raised while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid demo data: {0}")]
    Invalid(#[from] stockmedia_core::error::CoreError),
}

/// Insert the demo users, assets, order and payout.
///
/// Demo assets are inserted approved so the public catalog is populated.
pub async fn seed_demo_data(pool: &PgPool) -> Result<SeedSummary, SeedError> {
    let mut tx = pool.begin().await?;

    let mut user_ids = Vec::with_capacity(USERS.len());
    for user in USERS {
        user_ids.push(upsert_user(&mut tx, user).await?);
    }

    for asset in ASSETS {
        let (base, thumb, preview, watermarked) = cdn_urls(asset);
        sqlx::query(
            "INSERT INTO media_assets \
                (title, description, media_type, tags, category, cloudinary_id, \
                 original_url, thumbnail_url, preview_url, watermarked_url, \
                 width, height, duration, file_size, format, price, license_type, \
                 user_id, is_active, is_approved) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 1920, 1080, $11, $12, $13, \
                     $14, $15, $16, TRUE, TRUE) \
             ON CONFLICT (cloudinary_id) DO NOTHING",
        )
        .bind(asset.title)
        .bind(asset.description)
        .bind(asset.media_type)
        .bind(asset.tags.iter().map(|t| t.to_string()).collect::<Vec<_>>())
        .bind(asset.category)
        .bind(asset.cloudinary_id)
        .bind(base)
        .bind(thumb)
        .bind(preview)
        .bind(watermarked)
        .bind(asset.duration)
        .bind(asset.file_size)
        .bind(asset.ext)
        .bind(asset.price)
        .bind(asset.license_type)
        .bind(user_ids[asset.owner])
        .execute(&mut *tx)
        .await?;
    }

    for (i, (title, url)) in DISCOVER_LIBRARY.iter().enumerate() {
        // Alternate between the two contributors.
        let owner = user_ids[1 + i % 2];
        let base = format!("{url}?q=80&auto=format&fit=crop");
        let thumb = format!("{url}?w=600&q=80&auto=format&fit=crop");
        sqlx::query(
            "INSERT INTO media_assets \
                (title, media_type, category, cloudinary_id, original_url, thumbnail_url, \
                 preview_url, width, height, format, price, license_type, user_id, \
                 is_active, is_approved) \
             VALUES ($1, 'IMAGE', 'Discover', $2, $3, $4, $3, 1200, 800, 'jpg', $5, \
                     'STANDARD', $6, TRUE, TRUE) \
             ON CONFLICT (cloudinary_id) DO NOTHING",
        )
        .bind(*title)
        .bind(format!("unsplash-{i}"))
        .bind(&base)
        .bind(thumb)
        .bind(DISCOVER_PRICE)
        .bind(owner)
        .execute(&mut *tx)
        .await?;
    }

    seed_order_and_payout(&mut tx, &user_ids).await?;

    tx.commit().await?;

    let summary = summarize(pool).await?;
    tracing::info!(
        users = summary.users,
        media_assets = summary.media_assets,
        licenses = summary.licenses,
        orders = summary.orders,
        payouts = summary.payouts,
        "Demo data seeded",
    );
    Ok(summary)
}

async fn upsert_user(
    tx: &mut Transaction<'_, Postgres>,
    user: &DemoUser,
) -> Result<DbId, sqlx::Error> {
    // `DO UPDATE` with a no-op assignment so RETURNING yields the existing id.
    sqlx::query_scalar::<_, DbId>(
        "INSERT INTO users (email, name, role, supabase_id) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email \
         RETURNING id",
    )
    .bind(user.email)
    .bind(user.name)
    .bind(user.role)
    .bind(user.supabase_id)
    .fetch_one(&mut **tx)
    .await
}

/// A completed order by the demo customer and a settled payout of the first
/// contributor's share of it.
async fn seed_order_and_payout(
    tx: &mut Transaction<'_, Postgres>,
    user_ids: &[DbId],
) -> Result<(), SeedError> {
    let existing = sqlx::query_scalar::<_, DbId>("SELECT id FROM orders WHERE order_number = $1")
        .bind(DEMO_ORDER_NUMBER)
        .fetch_optional(&mut **tx)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let mut lines = Vec::new();
    for title in DEMO_ORDER_ASSETS {
        let (id, price) = sqlx::query_as::<_, (DbId, Cents)>(
            "SELECT id, price FROM media_assets WHERE title = $1 ORDER BY id LIMIT 1",
        )
        .bind(*title)
        .fetch_one(&mut **tx)
        .await?;
        lines.push((id, price_line(price, 1)?));
    }
    let priced: Vec<_> = lines.iter().map(|(_, l)| *l).collect();
    let total = order_total(&priced)?;

    let customer = &USERS[3];
    let order_id = sqlx::query_scalar::<_, DbId>(
        "INSERT INTO orders \
            (order_number, status, customer_email, customer_name, total_amount, \
             transaction_id, payment_method, completed_at, user_id) \
         VALUES ($1, 'COMPLETED', $2, $3, $4, 'txn-sample-001', 'Credit Card', NOW(), $5) \
         RETURNING id",
    )
    .bind(DEMO_ORDER_NUMBER)
    .bind(customer.email)
    .bind(customer.name)
    .bind(total)
    .bind(user_ids[3])
    .fetch_one(&mut **tx)
    .await?;

    for (asset_id, line) in &lines {
        sqlx::query(
            "INSERT INTO order_items \
                (order_id, media_asset_id, license_type, quantity, unit_price, total_price) \
             VALUES ($1, $2, 'STANDARD', $3, $4, $5)",
        )
        .bind(order_id)
        .bind(*asset_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.total_price)
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query(
        "INSERT INTO payouts (amount, status, payment_method, processed_at, user_id) \
         VALUES ($1, 'COMPLETED', 'Bank Transfer', NOW(), $2)",
    )
    .bind(contributor_share(lines[0].1.total_price))
    .bind(user_ids[1])
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn cdn_urls(asset: &DemoAsset) -> (String, String, String, String) {
    let resource = if asset.media_type == "VIDEO" { "video" } else { "image" };
    let root = format!("https://res.cloudinary.com/demo/{resource}/upload");
    let id = asset.cloudinary_id;
    let ext = asset.ext;
    // Video thumbnails are stills.
    let thumb_ext = if resource == "video" { "jpg" } else { ext };
    (
        format!("{root}/{id}.{ext}"),
        format!("{root}/w_400/{id}.{thumb_ext}"),
        format!("{root}/w_800/{id}.{ext}"),
        format!("{root}/w_800/l_watermark/{id}.{ext}"),
    )
}

async fn summarize(pool: &PgPool) -> Result<SeedSummary, sqlx::Error> {
    let (users, media_assets, licenses, orders, payouts) =
        sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
            "SELECT \
                (SELECT COUNT(*) FROM users), \
                (SELECT COUNT(*) FROM media_assets), \
                (SELECT COUNT(*) FROM licenses), \
                (SELECT COUNT(*) FROM orders), \
                (SELECT COUNT(*) FROM payouts)",
        )
        .fetch_one(pool)
        .await?;
    Ok(SeedSummary {
        users,
        media_assets,
        licenses,
        orders,
        payouts,
    })
}
