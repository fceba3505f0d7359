//! Load the demo catalog: users, assets, a completed order and a payout.
//!
//! Safe to re-run; existing rows are left in place.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockmedia_db=info,stockmedia_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = stockmedia_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    stockmedia_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let summary = stockmedia_db::seed::seed_demo_data(&pool)
        .await
        .context("Failed to seed demo data")?;

    tracing::info!(
        users = summary.users,
        media_assets = summary.media_assets,
        licenses = summary.licenses,
        orders = summary.orders,
        payouts = summary.payouts,
        "Seed complete",
    );

    pool.close().await;
    Ok(())
}
